use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::session::SessionMode;
use crate::timer::format_clock;
use crate::tui::App;

pub fn draw_titlebar(f: &mut Frame, area: Rect, app: &App) {
    let title = &app.session.bank().title;

    // The exam clock lives up here; the drill's per-question countdown is
    // rendered next to the reveal instead.
    let clock = match app.session.mode() {
        SessionMode::TimedExam { .. } => app.session.remaining_global(),
        SessionMode::RevealDrill { .. } => None,
    };

    let timer_text = if let Some(secs) = clock {
        let formatted = format!(" {} remaining ", format_clock(secs));
        if secs <= 120 {
            Span::styled(
                formatted,
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(formatted, Style::default().fg(Color::Rgb(200, 200, 120)))
        }
    } else {
        Span::raw("")
    };

    let title_text = format!("[ {} ]", title);
    let title_span = Span::styled(
        title_text.clone(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let available = area.width as usize;
    let timer_len = clock
        .map(|secs| format_clock(secs).len() + 12)
        .unwrap_or(0);
    let title_len = title_text.len();
    let center_pad = if available > title_len {
        (available - title_len) / 2
    } else {
        0
    };
    let right_pad = available.saturating_sub(center_pad + title_len + timer_len);

    let line = Line::from(vec![
        Span::raw(" ".repeat(center_pad)),
        title_span,
        Span::raw(" ".repeat(right_pad)),
        timer_text,
    ]);

    let widget = Paragraph::new(line)
        .style(Style::default().bg(Color::DarkGray))
        .alignment(Alignment::Left);
    f.render_widget(widget, area);
}
