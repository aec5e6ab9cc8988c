use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::session::SessionMode;
use crate::tui::{App, Dialog};

pub fn draw_dialog(f: &mut Frame, area: Rect, app: &App) {
    let Some(dialog) = app.top_dialog() else {
        return;
    };

    match dialog {
        Dialog::ConfirmFinishEarly => draw_confirm_finish_early(f, area, app),
        Dialog::ConfirmSubmit => draw_confirm_submit(f, area, app),
        Dialog::ConfirmQuit => draw_confirm_quit(f, area),
        Dialog::Help => draw_help(f, area, app),
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn draw_confirm_finish_early(f: &mut Frame, area: Rect, app: &App) {
    let answered = app.session.answered_count();
    let total = app.session.len();
    let correct = app.session.correct_count();

    let mut lines: Vec<Line> = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   End the session early?",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "   You have answered {} of {} questions.",
            answered, total
        )),
    ];

    // The drill marks as it goes, so the running score is known; the exam
    // keeps correctness hidden until finish.
    if matches!(app.session.mode(), SessionMode::RevealDrill { .. }) {
        lines.push(Line::from(format!(
            "   Current score: {}/{}",
            correct, answered
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("   [Enter] End now", Style::default().fg(Color::Green)),
        Span::raw("    "),
        Span::styled("[Esc] Keep going", Style::default().fg(Color::DarkGray)),
    ]));
    lines.push(Line::from(""));

    let rect = centered_rect(46, lines.len() as u16, area);
    f.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let widget = Paragraph::new(lines).block(block);
    f.render_widget(widget, rect);
}

fn draw_confirm_submit(f: &mut Frame, area: Rect, app: &App) {
    let unanswered = app.session.len() - app.session.answered_count();

    let mut lines: Vec<Line> = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Submit your exam?",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if unanswered > 0 {
        lines.push(Line::from(format!(
            "   {} questions are not answered.",
            unanswered
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled("   [Enter] Submit", Style::default().fg(Color::Green)),
        Span::raw("    "),
        Span::styled("[Esc] Cancel", Style::default().fg(Color::DarkGray)),
    ]));
    lines.push(Line::from(""));

    let rect = centered_rect(42, lines.len() as u16, area);
    f.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let widget = Paragraph::new(lines).block(block);
    f.render_widget(widget, rect);
}

fn draw_confirm_quit(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Quit?",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("   The session will be discarded."),
        Line::from(""),
        Line::from(vec![
            Span::styled("   [Enter] Confirm", Style::default().fg(Color::Green)),
            Span::raw("    "),
            Span::styled("[Esc] Cancel", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
    ];

    let rect = centered_rect(38, lines.len() as u16, area);
    f.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let widget = Paragraph::new(lines).block(block);
    f.render_widget(widget, rect);
}

fn draw_help(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Key Bindings",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    match app.session.mode() {
        SessionMode::RevealDrill { .. } => {
            lines.push(Line::from("   A-Z        Answer the question"));
            lines.push(Line::from("   →/Enter    Next (after reveal)"));
            lines.push(Line::from("   ←          Previous question"));
        }
        SessionMode::TimedExam { .. } => {
            lines.push(Line::from("   A-Z        Select an option"));
            lines.push(Line::from("   ←/→        Previous/Next question"));
            lines.push(Line::from("   PgUp/PgDn  Jump 5 questions"));
            lines.push(Line::from("   Home/End   First/Last question"));
            lines.push(Line::from("   Ctrl+S     Submit exam"));
        }
    }

    lines.push(Line::from("   Ctrl+E     End session early"));
    lines.push(Line::from("   Ctrl+Q     Quit"));
    lines.push(Line::from("   ?          This help"));
    lines.push(Line::from("   Esc        Close dialog"));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "        [Esc] Close",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));

    let rect = centered_rect(44, lines.len() as u16, area);
    f.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .border_style(Style::default().fg(Color::Cyan));
    let widget = Paragraph::new(lines).block(block);
    f.render_widget(widget, rect);
}
