use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frontmatter {
    pub title: Option<String>,
    #[serde(default)]
    pub mode: Option<ModeName>,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    #[serde(default)]
    pub reveal_seconds: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeName {
    Drill,
    Exam,
}

/// A fully normalized question bank. Presentation order is the vector
/// order and is fixed for the lifetime of a session.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    pub frontmatter: Frontmatter,
    pub title: String,
    pub preamble: Vec<String>,
    pub questions: Vec<Question>,
    pub source_file: String,
    pub bank_hash: String,
}

#[derive(Debug, Clone)]
pub struct Question {
    /// Stable identity: the global number from the bank file heading
    /// (package-derived in the upstream data, e.g. (package-1)*50 + order).
    pub number: u32,
    pub prompt: String,
    pub options: Vec<Choice>,
    pub correct: char,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub key: char,
    pub text: String,
}

impl Question {
    pub fn has_option(&self, key: char) -> bool {
        self.options.iter().any(|c| c.key == key)
    }

    pub fn correct_text(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|c| c.key == self.correct)
            .map(|c| c.text.as_str())
    }
}

/// Question shape as produced by the parser, before key normalization.
#[derive(Debug, Clone)]
pub struct QuestionDraft {
    pub number: u32,
    pub prompt: String,
    pub options: Vec<OptionDraft>,
    pub explanation: Option<String>,
}

/// One option line. `key` is `Some` when the bank file letters its own
/// options; bare lists get keys synthesized at bank construction.
#[derive(Debug, Clone)]
pub struct OptionDraft {
    pub key: Option<char>,
    pub text: String,
    pub correct: bool,
}

#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error("bank file must start with YAML frontmatter (---)")]
    MissingFrontmatter,
    #[error("no closing --- for frontmatter")]
    UnterminatedFrontmatter,
    #[error("invalid frontmatter: {0}")]
    BadFrontmatter(String),
    #[error("question heading must be '## N. Prompt', got: {0}")]
    BadHeading(String),
    #[error("question bank contains no questions")]
    EmptyBank,
    #[error("duplicate question number {number}")]
    DuplicateNumber { number: u32 },
    #[error("question {number} has {count} option(s), at least 2 required")]
    TooFewOptions { number: u32, count: usize },
    #[error("question {number} has {count} options, at most 26 supported")]
    TooManyOptions { number: u32, count: usize },
    #[error("question {number} marks {count} options correct, exactly 1 required")]
    BadCorrectCount { number: u32, count: usize },
    #[error("question {number} mixes lettered and bare options")]
    MixedOptionShapes { number: u32 },
    #[error("question {number} repeats option key {key}")]
    DuplicateKey { number: u32, key: char },
}

impl QuestionBank {
    pub fn new(
        frontmatter: Frontmatter,
        title: String,
        preamble: Vec<String>,
        drafts: Vec<QuestionDraft>,
        source_file: &str,
        bank_hash: &str,
    ) -> Result<Self, ConstructionError> {
        if drafts.is_empty() {
            return Err(ConstructionError::EmptyBank);
        }

        let mut questions: Vec<Question> = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let question = normalize_question(draft)?;
            if questions.iter().any(|q| q.number == question.number) {
                return Err(ConstructionError::DuplicateNumber {
                    number: question.number,
                });
            }
            questions.push(question);
        }

        Ok(Self {
            frontmatter,
            title,
            preamble,
            questions,
            source_file: source_file.to_string(),
            bank_hash: bank_hash.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question(&self, position: usize) -> Option<&Question> {
        self.questions.get(position)
    }
}

/// Normalize one draft: accept pre-lettered keys as-is (uppercased) or
/// synthesize A, B, C… over a bare list. Exactly one correct mark.
fn normalize_question(draft: QuestionDraft) -> Result<Question, ConstructionError> {
    let number = draft.number;
    let count = draft.options.len();
    if count < 2 {
        return Err(ConstructionError::TooFewOptions { number, count });
    }
    if count > 26 {
        return Err(ConstructionError::TooManyOptions { number, count });
    }

    let marked = draft.options.iter().filter(|o| o.correct).count();
    if marked != 1 {
        return Err(ConstructionError::BadCorrectCount {
            number,
            count: marked,
        });
    }

    let lettered = draft.options.iter().filter(|o| o.key.is_some()).count();
    if lettered != 0 && lettered != count {
        return Err(ConstructionError::MixedOptionShapes { number });
    }

    let mut options: Vec<Choice> = Vec::with_capacity(count);
    let mut correct = None;
    for (i, opt) in draft.options.into_iter().enumerate() {
        let key = match opt.key {
            Some(k) => k.to_ascii_uppercase(),
            None => (b'A' + i as u8) as char,
        };
        if options.iter().any(|c| c.key == key) {
            return Err(ConstructionError::DuplicateKey { number, key });
        }
        if opt.correct {
            correct = Some(key);
        }
        options.push(Choice { key, text: opt.text });
    }

    Ok(Question {
        number,
        prompt: draft.prompt,
        options,
        // Exactly one marked option, verified above.
        correct: correct.expect("one option is marked correct"),
        explanation: draft.explanation,
    })
}
