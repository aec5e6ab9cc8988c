use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::model::QuestionBank;
use crate::score::{ReviewOutcome, SessionResult, Tier};
use crate::session::{Session, SessionMode};
use crate::{score, timer};

/// Render a finished session as YAML for export. Built by hand so the
/// field order matches the reader's expectation top to bottom.
pub fn build_result_yaml(session: &Session, result: &SessionResult) -> String {
    let bank = session.bank();
    let mut out = String::new();

    out.push_str("session:\n");
    out.push_str(&format!("  title: {:?}\n", bank.title));
    out.push_str(&format!("  source: {:?}\n", bank.source_file));
    out.push_str(&format!("  bank_hash: {:?}\n", bank.bank_hash));
    out.push_str(&format!("  mode: {}\n", session.mode().label()));
    out.push_str(&format!(
        "  started_at: {:?}\n",
        session.started_at().to_rfc3339()
    ));
    if let Some(finished) = session.finished_at() {
        out.push_str(&format!("  finished_at: {:?}\n", finished.to_rfc3339()));
    }
    out.push_str(&format!(
        "  elapsed: {:?}\n",
        format_elapsed(result.elapsed_secs)
    ));

    out.push_str("\nresult:\n");
    out.push_str(&format!("  correct: {}\n", result.correct));
    out.push_str(&format!("  considered: {}\n", result.considered));
    out.push_str(&format!("  total: {}\n", result.total));
    if result.early_end {
        out.push_str("  early_end: true\n");
    }
    match session.mode() {
        SessionMode::RevealDrill { .. } => {
            out.push_str(&format!("  percentage: {}\n", result.percentage()));
            let verdict: Tier = score::tier(result.percentage());
            out.push_str(&format!("  verdict: {:?}\n", verdict.message()));
        }
        SessionMode::TimedExam { .. } => {
            out.push_str(&format!(
                "  grade_fixed: {:.1}\n",
                score::grade_over_fixed_thirty(result.correct)
            ));
            out.push_str(&format!(
                "  grade_ratio: {:.2}\n",
                score::grade_out_of_ten(result.correct, result.considered)
            ));
            out.push_str(&format!("  passed: {}\n", result.passed()));
        }
    }

    out.push_str("\nquestions:\n");
    for review in &result.details {
        out.push_str(&format!("  - number: {}\n", review.number));
        out.push_str(&format!("    prompt: {:?}\n", review.prompt));
        out.push_str("    options:\n");
        for choice in &review.options {
            out.push_str(&format!("      {}: {:?}\n", choice.key, choice.text));
        }
        out.push_str(&format!("    correct: {}\n", review.correct_key));
        match review.chosen {
            Some(key) => out.push_str(&format!("    chosen: {}\n", key)),
            None => out.push_str("    chosen: null\n"),
        }
        let outcome = match review.outcome {
            ReviewOutcome::Correct => "correct",
            ReviewOutcome::Incorrect => "incorrect",
            ReviewOutcome::Unanswered => "unanswered",
        };
        out.push_str(&format!("    outcome: {}\n", outcome));
        if let Some(ref explanation) = review.explanation {
            out.push_str(&format!("    explanation: {:?}\n", explanation));
        }
    }

    out
}

pub fn export_result(
    session: &Session,
    result: &SessionResult,
    path: &str,
) -> Result<(), String> {
    let yaml = build_result_yaml(session, result);
    atomic_write(Path::new(path), &yaml)
}

fn atomic_write(path: &Path, content: &str) -> Result<(), String> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content).map_err(|e| format!("Cannot write {}: {}", tmp.display(), e))?;
    fs::rename(&tmp, path).map_err(|e| format!("Cannot rename: {}", e))?;
    Ok(())
}

fn format_elapsed(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Bank summary for `--check`: validate and describe without starting.
pub fn print_bank_summary(bank: &QuestionBank) {
    println!("Bank: {}", bank.title);
    println!("Source: {}", bank.source_file);
    println!("Questions: {}", bank.len());
    if let Some(mode) = bank.frontmatter.mode {
        println!("Default mode: {:?}", mode);
    }
    if let Some(minutes) = bank.frontmatter.duration_minutes {
        println!("Exam duration: {}", timer::format_duration(minutes * 60));
    }
    if let Some(secs) = bank.frontmatter.reveal_seconds {
        println!("Reveal window: {}s", secs);
    }
    let with_explanation = bank
        .questions
        .iter()
        .filter(|q| q.explanation.is_some())
        .count();
    println!("With explanation: {}", with_explanation);
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

pub fn compute_file_hash(path: &Path) -> Result<String, String> {
    let content =
        fs::read(path).map_err(|e| format!("Cannot read file {}: {}", path.display(), e))?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    let result = hasher.finalize();
    Ok(format!("sha256:{}", hex_encode(&result)))
}

pub fn compute_str_hash(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    let result = hasher.finalize();
    format!("sha256:{}", hex_encode(&result))
}
