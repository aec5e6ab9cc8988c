use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::App;

pub fn draw_statusbar(f: &mut Frame, area: Rect, app: &App) {
    let answered = app.session.answered_count();
    let total = app.session.len();

    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(
            format!("● {} answered", answered),
            Style::default().fg(Color::Green),
        ),
        Span::raw("   "),
        Span::styled(
            format!("○ {} unanswered", total - answered),
            Style::default().fg(Color::White),
        ),
        Span::raw("   "),
        Span::styled("[?] help", Style::default().fg(Color::DarkGray)),
    ]);

    let widget = Paragraph::new(line).style(Style::default().bg(Color::Rgb(30, 30, 30)));
    f.render_widget(widget, area);
}
