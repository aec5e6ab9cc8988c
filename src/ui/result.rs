use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::score::{self, ReviewOutcome};
use crate::session::SessionMode;
use crate::timer::format_clock;
use crate::tui::App;

pub fn draw_result(f: &mut Frame, area: Rect, app: &App) {
    let Ok(result) = app.session.result() else {
        return;
    };

    let mut lines: Vec<Line> = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Session Result",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "  Score: {}/{} ({}%)",
            result.correct,
            result.considered,
            result.percentage()
        )),
    ];

    match app.session.mode() {
        SessionMode::RevealDrill { .. } => {
            let tier = score::tier(result.percentage());
            lines.push(Line::from(Span::styled(
                format!("  {}", tier.message()),
                Style::default().fg(Color::Cyan),
            )));
        }
        SessionMode::TimedExam { .. } => {
            lines.push(Line::from(format!(
                "  Grade (/30 scale): {:.1}    Grade (ratio): {:.2}",
                score::grade_over_fixed_thirty(result.correct),
                score::grade_out_of_ten(result.correct, result.considered)
            )));
            let (verdict, color) = if result.passed() {
                ("PASSED", Color::Green)
            } else {
                ("FAILED", Color::Red)
            };
            lines.push(Line::from(Span::styled(
                format!("  Result: {}", verdict),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
        }
    }

    lines.push(Line::from(format!(
        "  Time: {}",
        format_clock(result.elapsed_secs)
    )));
    if result.early_end {
        lines.push(Line::from(Span::styled(
            format!("  Ended early after {} questions", result.considered),
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  ── Review ──",
        Style::default().fg(Color::DarkGray),
    )));

    for review in &result.details {
        lines.push(Line::from(""));

        let (icon, color) = match review.outcome {
            ReviewOutcome::Correct => ("✓", Color::Green),
            ReviewOutcome::Incorrect => ("✗", Color::Red),
            ReviewOutcome::Unanswered => ("·", Color::DarkGray),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", icon), Style::default().fg(color)),
            Span::styled(
                format!("Q{}. ", review.number),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(review.prompt.replace('\n', " ")),
        ]));

        for choice in &review.options {
            let is_correct = choice.key == review.correct_key;
            let is_chosen = review.chosen == Some(choice.key);
            let style = if is_correct {
                Style::default().fg(Color::Green)
            } else if is_chosen {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let marker = if is_chosen { "▸" } else { " " };
            lines.push(Line::from(Span::styled(
                format!("    {} {}. {}", marker, choice.key, choice.text),
                style,
            )));
        }

        if let Some(ref explanation) = review.explanation {
            lines.push(Line::from(Span::styled(
                format!("      Explanation: {}", explanation),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  [↑/↓] Scroll    [Enter] Exit",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));

    let scroll = app.review_scroll.min(lines.len().saturating_sub(1)) as u16;
    let block = Block::default().borders(Borders::ALL);
    let widget = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(widget, area);
}
