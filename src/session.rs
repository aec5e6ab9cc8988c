use std::sync::mpsc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::ledger::{AnswerLedger, RecordOutcome};
use crate::model::{Question, QuestionBank};
use crate::score::{self, SessionResult};
use crate::timer::{Countdown, TimerEvent, TimerSignal};

pub const DEFAULT_EXAM_SECS: i64 = 30 * 60;
pub const DEFAULT_REVEAL_SECS: i64 = 30;

/// The two timing/navigation policies. A reveal drill marks each answer
/// immediately and force-advances on a per-question countdown; a timed
/// exam runs one global clock with free navigation and no reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    RevealDrill { advance_window_secs: i64 },
    TimedExam { total_secs: i64 },
}

impl SessionMode {
    pub fn label(&self) -> &'static str {
        match self {
            SessionMode::RevealDrill { .. } => "drill",
            SessionMode::TimedExam { .. } => "exam",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingAnswer,
    Revealed,
    Finished,
}

/// Reason codes for operations that are illegal in the current state.
/// The session is left unchanged when one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("the current question is already revealed")]
    AlreadyRevealed,
    #[error("no answer has been submitted for the current question")]
    NotRevealed,
    #[error("the session is already finished")]
    SessionFinished,
    #[error("the session is not finished yet")]
    NotFinished,
    #[error("already at the first question")]
    AtFirstQuestion,
    #[error("question position {0} is out of range")]
    OutOfRange(usize),
    #[error("'{0}' is not an option key of this question")]
    UnknownOption(char),
    #[error("operation not available in this session mode")]
    WrongMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOutcome {
    /// Event from a superseded or disarmed countdown instance; dropped.
    Ignored,
    Ticked,
    AutoAdvanced,
    TimeExpired,
}

/// The session engine. All mutation goes through these methods from the
/// host's single event loop; timer callbacks arrive as `TimerEvent`s on
/// the receiver returned by `start` and are fed back via `handle_timer`.
pub struct Session {
    bank: QuestionBank,
    mode: SessionMode,
    position: usize,
    phase: Phase,
    ledger: AnswerLedger,
    correct_count: u32,
    attempted: Option<usize>,
    remaining_global: Option<i64>,
    remaining_question: Option<i64>,
    clock: Countdown,
    /// Generation of the countdown instance currently allowed to act.
    /// `None` while no clock is logically running, even if a superseded
    /// thread has not observed its cancellation yet.
    armed: Option<u64>,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    elapsed_secs: Option<i64>,
}

impl Session {
    pub fn start(bank: QuestionBank, mode: SessionMode) -> (Self, mpsc::Receiver<TimerEvent>) {
        let (mut clock, rx) = Countdown::new();

        let mut armed = None;
        let mut remaining_global = None;
        if let SessionMode::TimedExam { total_secs } = mode {
            armed = Some(clock.start(total_secs));
            remaining_global = Some(total_secs);
        }

        let session = Self {
            bank,
            mode,
            position: 0,
            phase: Phase::AwaitingAnswer,
            ledger: AnswerLedger::new(),
            correct_count: 0,
            attempted: None,
            remaining_global,
            remaining_question: None,
            clock,
            armed,
            started_at: Utc::now(),
            finished_at: None,
            elapsed_secs: None,
        };
        (session, rx)
    }

    // --- Policy A: per-question reveal with forced countdown ---

    /// Record an answer for the current question, reveal the marking, and
    /// arm the auto-advance countdown. Rejected once revealed: re-answering
    /// is not allowed while the marking for this question is on screen.
    pub fn submit_answer(&mut self, key: char) -> Result<Submission, Rejection> {
        let window = match self.mode {
            SessionMode::RevealDrill { advance_window_secs } => advance_window_secs,
            SessionMode::TimedExam { .. } => return Err(Rejection::WrongMode),
        };
        match self.phase {
            Phase::Finished => return Err(Rejection::SessionFinished),
            Phase::Revealed => return Err(Rejection::AlreadyRevealed),
            Phase::AwaitingAnswer => {}
        }

        let key = key.to_ascii_uppercase();
        let question = &self.bank.questions[self.position];
        if !question.has_option(key) {
            return Err(Rejection::UnknownOption(key));
        }
        let correct = key == question.correct;
        let number = question.number;
        self.record_answer(number, key, correct);

        self.phase = Phase::Revealed;
        self.armed = Some(self.clock.start(window));
        self.remaining_question = Some(window);
        Ok(Submission { correct })
    }

    /// Move to the next question, or finish from the last one. A question
    /// answered earlier re-enters `Revealed` from its stored record with no
    /// countdown: reviewing consumes no time.
    pub fn advance(&mut self) -> Result<Advance, Rejection> {
        if !matches!(self.mode, SessionMode::RevealDrill { .. }) {
            return Err(Rejection::WrongMode);
        }
        match self.phase {
            Phase::Finished => Err(Rejection::SessionFinished),
            Phase::AwaitingAnswer => Err(Rejection::NotRevealed),
            Phase::Revealed => {
                self.disarm();
                Ok(self.advance_over_revealed())
            }
        }
    }

    /// Step back one question. Never deletes or recomputes the answer
    /// already recorded there.
    pub fn retreat(&mut self) -> Result<(), Rejection> {
        if !matches!(self.mode, SessionMode::RevealDrill { .. }) {
            return Err(Rejection::WrongMode);
        }
        if self.phase == Phase::Finished {
            return Err(Rejection::SessionFinished);
        }
        if self.position == 0 {
            return Err(Rejection::AtFirstQuestion);
        }
        self.disarm();
        self.position -= 1;
        self.enter_position();
        Ok(())
    }

    // --- Policy B: global countdown, free navigation ---

    /// Record (or overwrite) the answer at any position. Correctness is
    /// computed now but not shown until finish.
    pub fn select_option(&mut self, position: usize, key: char) -> Result<Submission, Rejection> {
        if !matches!(self.mode, SessionMode::TimedExam { .. }) {
            return Err(Rejection::WrongMode);
        }
        if self.phase == Phase::Finished {
            return Err(Rejection::SessionFinished);
        }
        let question = self
            .bank
            .question(position)
            .ok_or(Rejection::OutOfRange(position))?;

        let key = key.to_ascii_uppercase();
        if !question.has_option(key) {
            return Err(Rejection::UnknownOption(key));
        }
        let correct = key == question.correct;
        let number = question.number;
        self.record_answer(number, key, correct);
        Ok(Submission { correct })
    }

    pub fn jump_to(&mut self, position: usize) -> Result<(), Rejection> {
        if !matches!(self.mode, SessionMode::TimedExam { .. }) {
            return Err(Rejection::WrongMode);
        }
        if self.phase == Phase::Finished {
            return Err(Rejection::SessionFinished);
        }
        if position >= self.bank.len() {
            return Err(Rejection::OutOfRange(position));
        }
        self.position = position;
        Ok(())
    }

    /// Finish the exam over the full set: explicit submit and clock expiry
    /// converge here.
    pub fn finish(&mut self) -> Result<(), Rejection> {
        if !matches!(self.mode, SessionMode::TimedExam { .. }) {
            return Err(Rejection::WrongMode);
        }
        if self.phase == Phase::Finished {
            return Err(Rejection::SessionFinished);
        }
        self.finish_session(None);
        Ok(())
    }

    // --- Shared operations ---

    /// Terminate before the end of the set. The number of questions
    /// presented so far becomes the considered count for partial scoring.
    pub fn finish_early(&mut self) -> Result<(), Rejection> {
        if self.phase == Phase::Finished {
            return Err(Rejection::SessionFinished);
        }
        let attempted = self.position + 1;
        self.finish_session(Some(attempted));
        Ok(())
    }

    /// Apply a countdown event. Events from superseded instances are
    /// silently dropped; that race is expected and harmless.
    pub fn handle_timer(&mut self, event: TimerEvent) -> TimerOutcome {
        if self.phase == Phase::Finished || Some(event.generation) != self.armed {
            return TimerOutcome::Ignored;
        }
        match event.signal {
            TimerSignal::Tick(secs) => {
                match self.mode {
                    SessionMode::RevealDrill { .. } => self.remaining_question = Some(secs),
                    SessionMode::TimedExam { .. } => self.remaining_global = Some(secs),
                }
                TimerOutcome::Ticked
            }
            TimerSignal::Expired => match self.mode {
                SessionMode::RevealDrill { .. } => {
                    self.disarm();
                    self.advance_over_revealed();
                    TimerOutcome::AutoAdvanced
                }
                SessionMode::TimedExam { .. } => {
                    self.remaining_global = Some(0);
                    self.finish_session(None);
                    TimerOutcome::TimeExpired
                }
            },
        }
    }

    pub fn result(&self) -> Result<SessionResult, Rejection> {
        if self.phase != Phase::Finished {
            return Err(Rejection::NotFinished);
        }
        Ok(score::score(
            &self.bank,
            &self.ledger,
            self.considered(),
            self.elapsed_secs.unwrap_or(0),
            self.attempted.is_some(),
        ))
    }

    // --- Snapshot accessors for the host ---

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.bank.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bank.is_empty()
    }

    pub fn current_question(&self) -> &Question {
        &self.bank.questions[self.position]
    }

    pub fn remaining_global(&self) -> Option<i64> {
        self.remaining_global
    }

    /// Remaining auto-advance seconds; `None` while the current question is
    /// unanswered or while a past answer is merely being reviewed.
    pub fn remaining_question(&self) -> Option<i64> {
        self.remaining_question
    }

    pub fn chosen_at(&self, position: usize) -> Option<char> {
        let question = self.bank.question(position)?;
        self.ledger.get(question.number).map(|r| r.chosen)
    }

    pub fn is_answered(&self, position: usize) -> bool {
        self.chosen_at(position).is_some()
    }

    pub fn answered_count(&self) -> usize {
        self.ledger.len()
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn considered(&self) -> usize {
        self.attempted.unwrap_or_else(|| self.bank.len())
    }

    pub fn ended_early(&self) -> bool {
        self.attempted.is_some()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Generation of the countdown instance currently armed, if any.
    pub fn armed_generation(&self) -> Option<u64> {
        self.armed
    }

    // --- Internals ---

    fn record_answer(&mut self, number: u32, key: char, correct: bool) {
        match self.ledger.record(number, key, correct) {
            RecordOutcome::Inserted => {
                if correct {
                    self.correct_count += 1;
                }
            }
            RecordOutcome::Replaced { previous } => {
                // A replacement must not double-count; only a changed
                // verdict moves the running score.
                if previous.correct && !correct {
                    self.correct_count -= 1;
                } else if !previous.correct && correct {
                    self.correct_count += 1;
                }
            }
        }
    }

    fn advance_over_revealed(&mut self) -> Advance {
        if self.position + 1 == self.bank.len() {
            self.finish_session(None);
            return Advance::Finished;
        }
        self.position += 1;
        self.enter_position();
        Advance::Moved
    }

    fn enter_position(&mut self) {
        self.remaining_question = None;
        let question = &self.bank.questions[self.position];
        match self.ledger.get(question.number) {
            Some(record) => {
                // Identity-keyed storage: a record surfacing here for any
                // other question is a broken invariant, not a state to
                // render around.
                debug_assert_eq!(record.question, question.number);
                self.phase = Phase::Revealed;
            }
            None => self.phase = Phase::AwaitingAnswer,
        }
    }

    fn disarm(&mut self) {
        self.clock.cancel();
        self.armed = None;
    }

    fn finish_session(&mut self, attempted: Option<usize>) {
        self.disarm();
        self.remaining_question = None;
        self.attempted = attempted;
        self.phase = Phase::Finished;
        let now = Utc::now();
        self.finished_at = Some(now);
        self.elapsed_secs = Some(match self.mode {
            SessionMode::TimedExam { total_secs } => {
                total_secs - self.remaining_global.unwrap_or(total_secs)
            }
            SessionMode::RevealDrill { .. } => {
                (now - self.started_at).num_seconds().max(0)
            }
        });
    }
}
