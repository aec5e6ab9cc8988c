use crate::ledger::AnswerLedger;
use crate::model::{Choice, QuestionBank};

/// Raw pass mark used by the exam result screen. Deliberately a count,
/// not a ratio: banks of other sizes keep the same bar. See DESIGN.md.
pub const PASS_MARK: u32 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    Correct,
    Incorrect,
    Unanswered,
}

/// One row of the per-question review, joined from the bank and the
/// ledger in presentation order.
#[derive(Debug, Clone)]
pub struct QuestionReview {
    pub number: u32,
    pub prompt: String,
    pub options: Vec<Choice>,
    pub correct_key: char,
    pub chosen: Option<char>,
    pub outcome: ReviewOutcome,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SessionResult {
    /// Count of correct ledger entries; never divided in here.
    pub correct: u32,
    /// Full set size, or the attempted count after an early end.
    pub considered: usize,
    pub total: usize,
    pub elapsed_secs: i64,
    pub early_end: bool,
    pub details: Vec<QuestionReview>,
}

pub fn score(
    bank: &QuestionBank,
    ledger: &AnswerLedger,
    considered: usize,
    elapsed_secs: i64,
    early_end: bool,
) -> SessionResult {
    let details = bank
        .questions
        .iter()
        .map(|q| {
            let record = ledger.get(q.number);
            QuestionReview {
                number: q.number,
                prompt: q.prompt.clone(),
                options: q.options.clone(),
                correct_key: q.correct,
                chosen: record.map(|r| r.chosen),
                outcome: match record {
                    None => ReviewOutcome::Unanswered,
                    Some(r) if r.correct => ReviewOutcome::Correct,
                    Some(_) => ReviewOutcome::Incorrect,
                },
                explanation: q.explanation.clone(),
            }
        })
        .collect();

    SessionResult {
        correct: ledger.correct_count(),
        considered,
        total: bank.len(),
        elapsed_secs,
        early_end,
        details,
    }
}

impl SessionResult {
    pub fn percentage(&self) -> u32 {
        percentage(self.correct, self.considered)
    }

    pub fn passed(&self) -> bool {
        is_passing(self.correct)
    }
}

/// Integer percentage over the considered count (drill result screen).
pub fn percentage(correct: u32, considered: usize) -> u32 {
    if considered == 0 {
        return 0;
    }
    (correct as f64 / considered as f64 * 100.0).round() as u32
}

/// Fixed-divisor ten-point grade to one decimal: correct / 30 * 10. The
/// divisor stays 30 regardless of bank size; kept as the source defined it.
pub fn grade_over_fixed_thirty(correct: u32) -> f64 {
    (correct as f64 / 30.0 * 10.0 * 10.0).round() / 10.0
}

/// Ratio ten-point grade to two decimals: correct / considered * 10.
pub fn grade_out_of_ten(correct: u32, considered: usize) -> f64 {
    if considered == 0 {
        return 0.0;
    }
    (correct as f64 / considered as f64 * 10.0 * 100.0).round() / 100.0
}

/// Raw count against PASS_MARK, independent of set size.
pub fn is_passing(correct: u32) -> bool {
    correct >= PASS_MARK
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Excellent,
    Good,
    NeedsImprovement,
    StudyAgain,
}

pub fn tier(percentage: u32) -> Tier {
    if percentage >= 80 {
        Tier::Excellent
    } else if percentage >= 60 {
        Tier::Good
    } else if percentage >= 40 {
        Tier::NeedsImprovement
    } else {
        Tier::StudyAgain
    }
}

impl Tier {
    pub fn message(&self) -> &'static str {
        match self {
            Tier::Excellent => "Excellent!",
            Tier::Good => "Good work!",
            Tier::NeedsImprovement => "Needs improvement",
            Tier::StudyAgain => "Back to studying",
        }
    }
}
