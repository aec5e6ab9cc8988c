use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::App;

const CELLS_PER_ROW: usize = 5;

/// Exam-mode question grid: one numbered cell per question, answered ones
/// filled in, the current one highlighted.
pub fn draw_grid(f: &mut Frame, area: Rect, app: &App) {
    let session = &app.session;
    let total = session.len();
    let current = session.position();

    let mut lines: Vec<Line> = vec![Line::from("")];

    let mut row: Vec<Span> = vec![Span::raw(" ")];
    for position in 0..total {
        let answered = session.is_answered(position);
        let is_current = position == current;

        let mut style = if answered {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        if is_current {
            style = style
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD);
        }

        row.push(Span::styled(format!(" {:>3} ", position + 1), style));

        if (position + 1) % CELLS_PER_ROW == 0 {
            lines.push(Line::from(std::mem::take(&mut row)));
            row.push(Span::raw(" "));
        }
    }
    if row.len() > 1 {
        lines.push(Line::from(row));
    }

    lines.push(Line::from(""));
    let answered_count = session.answered_count();
    lines.push(Line::from(vec![
        Span::styled("  ● ", Style::default().fg(Color::Green)),
        Span::raw(format!("{} answered", answered_count)),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  ○ ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{} unanswered", total - answered_count)),
    ]));

    let block = Block::default()
        .borders(Borders::LEFT)
        .title(" Questions ")
        .title_style(Style::default().add_modifier(Modifier::BOLD));

    let widget = Paragraph::new(lines).block(block);
    f.render_widget(widget, area);
}
