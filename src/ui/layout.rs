use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub titlebar: Rect,
    pub grid: Option<Rect>,
    pub main: Rect,
    pub statusbar: Rect,
    pub keybar: Rect,
}

pub fn compute_layout(area: Rect, with_grid: bool) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // titlebar
            Constraint::Min(5),    // middle (main + optional grid)
            Constraint::Length(1), // statusbar
            Constraint::Length(1), // keybar
        ])
        .split(area);

    let (grid, main) = if with_grid {
        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(20),    // main content
                Constraint::Length(28), // question grid
            ])
            .split(vertical[1]);
        (Some(middle[1]), middle[0])
    } else {
        (None, vertical[1])
    };

    AppLayout {
        titlebar: vertical[0],
        grid,
        main,
        statusbar: vertical[2],
        keybar: vertical[3],
    }
}
