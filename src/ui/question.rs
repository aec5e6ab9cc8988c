use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::session::{Phase, SessionMode};
use crate::tui::App;

pub fn draw_question(f: &mut Frame, area: Rect, app: &App) {
    let session = &app.session;
    let question = session.current_question();
    let chosen = session.chosen_at(session.position());
    let revealed = session.phase() == Phase::Revealed;

    let mut lines: Vec<Line> = vec![Line::from("")];

    lines.push(Line::from(vec![
        Span::styled(
            format!("  Question {}", question.number),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("    ({} of {})", session.position() + 1, session.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    lines.push(Line::from(""));

    for prompt_line in question.prompt.lines() {
        lines.push(Line::from(format!("  {}", prompt_line)));
    }
    lines.push(Line::from(""));

    for choice in &question.options {
        let is_chosen = chosen == Some(choice.key);
        let is_correct = choice.key == question.correct;

        let (marker, style) = match session.mode() {
            SessionMode::RevealDrill { .. } if revealed => {
                if is_correct {
                    ("✓", Style::default().fg(Color::Green))
                } else if is_chosen {
                    ("✗", Style::default().fg(Color::Red))
                } else {
                    (" ", Style::default().fg(Color::DarkGray))
                }
            }
            // No correctness marking before finish in an exam.
            SessionMode::TimedExam { .. } if is_chosen => {
                ("●", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            }
            _ => (" ", Style::default()),
        };

        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", marker), style),
            Span::styled(
                format!("{}. ", choice.key),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(choice.text.clone(), style),
        ]));
    }

    if let SessionMode::RevealDrill { .. } = session.mode() {
        if revealed {
            lines.push(Line::from(""));
            if chosen == Some(question.correct) {
                lines.push(Line::from(Span::styled(
                    "  ✓ Correct!",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )));
            } else {
                lines.push(Line::from(Span::styled(
                    format!("  ✗ Wrong — correct answer: {}", question.correct),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )));
            }

            if let Some(ref explanation) = question.explanation {
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    Span::styled(
                        "  Explanation: ",
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(explanation.clone()),
                ]));
            }

            lines.push(Line::from(""));
            match session.remaining_question() {
                Some(secs) => {
                    lines.push(Line::from(Span::styled(
                        format!("  Auto-advance in {}s", secs),
                        Style::default().fg(Color::Yellow),
                    )));
                }
                None => {
                    lines.push(Line::from(Span::styled(
                        "  Reviewing a previous answer",
                        Style::default().fg(Color::DarkGray),
                    )));
                }
            }
        }
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
