pub mod dialog;
pub mod grid;
pub mod keybar;
pub mod layout;
pub mod question;
pub mod result;
pub mod statusbar;
pub mod titlebar;

use ratatui::Frame;

use crate::session::{Phase, SessionMode};
use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    if app.session.phase() == Phase::Finished {
        result::draw_result(f, area, app);
        return;
    }

    let with_grid = matches!(app.session.mode(), SessionMode::TimedExam { .. });
    let layout = layout::compute_layout(area, with_grid);

    titlebar::draw_titlebar(f, layout.titlebar, app);
    if let Some(grid_area) = layout.grid {
        grid::draw_grid(f, grid_area, app);
    }
    question::draw_question(f, layout.main, app);
    statusbar::draw_statusbar(f, layout.statusbar, app);
    keybar::draw_keybar(f, layout.keybar, app);

    if app.has_dialog() {
        dialog::draw_dialog(f, area, app);
    }
}
