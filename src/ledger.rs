use std::collections::HashMap;

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerRecord {
    pub question: u32,
    pub chosen: char,
    pub correct: bool,
    pub recorded_at: DateTime<Utc>,
}

/// Whether a `record` call created a fresh entry or replaced one. The
/// session uses this to adjust its running score without double-counting
/// a re-answered question.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Inserted,
    Replaced { previous: AnswerRecord },
}

/// Answers given during a session, keyed by question identity. Latest
/// answer wins; entries are never removed while the session lives, so
/// `len() <= bank.len()` always holds.
#[derive(Debug, Clone, Default)]
pub struct AnswerLedger {
    entries: HashMap<u32, AnswerRecord>,
}

impl AnswerLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, question: u32, chosen: char, correct: bool) -> RecordOutcome {
        let record = AnswerRecord {
            question,
            chosen,
            correct,
            recorded_at: Utc::now(),
        };
        match self.entries.insert(question, record) {
            Some(previous) => RecordOutcome::Replaced { previous },
            None => RecordOutcome::Inserted,
        }
    }

    pub fn get(&self, question: u32) -> Option<&AnswerRecord> {
        self.entries.get(&question)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn correct_count(&self) -> u32 {
        self.entries.values().filter(|r| r.correct).count() as u32
    }
}
