use std::io;
use std::sync::mpsc;
use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;

use crate::session::{Phase, Session, SessionMode};
use crate::timer::TimerEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    ConfirmFinishEarly,
    ConfirmSubmit,
    ConfirmQuit,
    Help,
}

/// Host-side state: the session plus what only the terminal cares about.
pub struct App {
    pub session: Session,
    pub dialog_stack: Vec<Dialog>,
    pub review_scroll: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            dialog_stack: Vec::new(),
            review_scroll: 0,
            should_quit: false,
        }
    }

    pub fn has_dialog(&self) -> bool {
        !self.dialog_stack.is_empty()
    }

    pub fn top_dialog(&self) -> Option<&Dialog> {
        self.dialog_stack.last()
    }

    pub fn push_dialog(&mut self, dialog: Dialog) {
        self.dialog_stack.push(dialog);
    }

    pub fn pop_dialog(&mut self) -> Option<Dialog> {
        self.dialog_stack.pop()
    }
}

pub fn run_tui(
    session: Session,
    timer_rx: mpsc::Receiver<TimerEvent>,
) -> Result<Session, String> {
    enable_raw_mode().map_err(|e| format!("Cannot enable raw mode: {}", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| format!("Cannot enter alternate screen: {}", e))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("Cannot create terminal: {}", e))?;

    let mut app = App::new(session);
    let result = main_loop(&mut terminal, &mut app, &timer_rx);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();

    result.map(|_| app.session)
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    timer_rx: &mpsc::Receiver<TimerEvent>,
) -> Result<(), String> {
    loop {
        terminal
            .draw(|f| crate::ui::draw(f, app))
            .map_err(|e| format!("Draw error: {}", e))?;

        if app.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100)).map_err(|e| format!("Poll error: {}", e))? {
            if let Event::Key(key) = event::read().map_err(|e| format!("Read error: {}", e))? {
                handle_key(key, app);
            }
        }

        // Timer events interleave with input on this one loop; the session
        // never sees concurrent mutation.
        while let Ok(ev) = timer_rx.try_recv() {
            app.session.handle_timer(ev);
        }
    }

    Ok(())
}

fn handle_key(key: KeyEvent, app: &mut App) {
    if app.has_dialog() {
        handle_dialog_key(key, app);
        return;
    }

    if app.session.phase() == Phase::Finished {
        handle_result_key(key, app);
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl {
        match key.code {
            KeyCode::Char('q') => {
                app.push_dialog(Dialog::ConfirmQuit);
                return;
            }
            KeyCode::Char('e') => {
                app.push_dialog(Dialog::ConfirmFinishEarly);
                return;
            }
            KeyCode::Char('s') => {
                if matches!(app.session.mode(), SessionMode::TimedExam { .. }) {
                    app.push_dialog(Dialog::ConfirmSubmit);
                }
                return;
            }
            _ => {}
        }
        return;
    }

    if key.code == KeyCode::Char('?') {
        app.push_dialog(Dialog::Help);
        return;
    }

    match app.session.mode() {
        SessionMode::RevealDrill { .. } => handle_drill_key(key, app),
        SessionMode::TimedExam { .. } => handle_exam_key(key, app),
    }
}

fn handle_drill_key(key: KeyEvent, app: &mut App) {
    match key.code {
        // Answer keys; rejected submissions (already revealed) are no-ops.
        KeyCode::Char(c) if c.is_ascii_alphabetic() => {
            let _ = app.session.submit_answer(c);
        }
        KeyCode::Right | KeyCode::Enter => {
            let _ = app.session.advance();
        }
        KeyCode::Left => {
            let _ = app.session.retreat();
        }
        _ => {}
    }
}

fn handle_exam_key(key: KeyEvent, app: &mut App) {
    let position = app.session.position();
    let last = app.session.len() - 1;
    match key.code {
        KeyCode::Char(c) if c.is_ascii_alphabetic() => {
            let _ = app.session.select_option(position, c);
        }
        KeyCode::Left => {
            if position > 0 {
                let _ = app.session.jump_to(position - 1);
            }
        }
        KeyCode::Right => {
            let _ = app.session.jump_to((position + 1).min(last));
        }
        KeyCode::PageUp => {
            let _ = app.session.jump_to(position.saturating_sub(5));
        }
        KeyCode::PageDown => {
            let _ = app.session.jump_to((position + 5).min(last));
        }
        KeyCode::Home => {
            let _ = app.session.jump_to(0);
        }
        KeyCode::End => {
            let _ = app.session.jump_to(last);
        }
        KeyCode::Enter => {
            if position == last {
                app.push_dialog(Dialog::ConfirmSubmit);
            } else {
                let _ = app.session.jump_to(position + 1);
            }
        }
        _ => {}
    }
}

fn handle_result_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Up => {
            app.review_scroll = app.review_scroll.saturating_sub(1);
        }
        KeyCode::Down => {
            app.review_scroll = app.review_scroll.saturating_add(1);
        }
        KeyCode::PageUp => {
            app.review_scroll = app.review_scroll.saturating_sub(10);
        }
        KeyCode::PageDown => {
            app.review_scroll = app.review_scroll.saturating_add(10);
        }
        KeyCode::Home => {
            app.review_scroll = 0;
        }
        KeyCode::Enter | KeyCode::Esc => {
            app.should_quit = true;
        }
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        _ => {}
    }
}

fn handle_dialog_key(key: KeyEvent, app: &mut App) {
    let Some(dialog) = app.top_dialog().cloned() else {
        return;
    };

    match dialog {
        Dialog::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?')) {
                app.pop_dialog();
            }
        }
        Dialog::ConfirmQuit => match key.code {
            KeyCode::Enter => {
                app.pop_dialog();
                app.should_quit = true;
            }
            KeyCode::Esc => {
                app.pop_dialog();
            }
            _ => {}
        },
        Dialog::ConfirmFinishEarly => match key.code {
            KeyCode::Enter => {
                app.pop_dialog();
                let _ = app.session.finish_early();
            }
            KeyCode::Esc => {
                app.pop_dialog();
            }
            _ => {}
        },
        Dialog::ConfirmSubmit => match key.code {
            KeyCode::Enter => {
                app.pop_dialog();
                let _ = app.session.finish();
            }
            KeyCode::Esc => {
                app.pop_dialog();
            }
            _ => {}
        },
    }
}
