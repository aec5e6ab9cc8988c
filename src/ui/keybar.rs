use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::session::{Phase, SessionMode};
use crate::tui::App;

pub fn draw_keybar(f: &mut Frame, area: Rect, app: &App) {
    let bindings: Vec<(&str, &str)> = match (app.session.mode(), app.session.phase()) {
        (SessionMode::RevealDrill { .. }, Phase::AwaitingAnswer) => vec![
            ("A-D", "answer"),
            ("←", "previous"),
            ("Ctrl+E", "end early"),
            ("Ctrl+Q", "quit"),
        ],
        (SessionMode::RevealDrill { .. }, _) => vec![
            ("→/Enter", "next"),
            ("←", "previous"),
            ("Ctrl+E", "end early"),
            ("Ctrl+Q", "quit"),
        ],
        (SessionMode::TimedExam { .. }, _) => vec![
            ("A-D", "select"),
            ("←/→", "move"),
            ("Home/End", "first/last"),
            ("Ctrl+S", "submit"),
            ("Ctrl+E", "end early"),
            ("Ctrl+Q", "quit"),
        ],
    };

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, action)) in bindings.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {}", action)));
    }

    let line = Line::from(spans);
    let widget = Paragraph::new(line).style(Style::default().bg(Color::Rgb(20, 20, 20)));
    f.render_widget(widget, area);
}
