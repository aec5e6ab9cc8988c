use termexam::ledger::{AnswerLedger, RecordOutcome};
use termexam::model::{Frontmatter, OptionDraft, QuestionBank, QuestionDraft};
use termexam::score::{
    self, grade_out_of_ten, grade_over_fixed_thirty, is_passing, percentage, ReviewOutcome, Tier,
};

fn bank(correct: &[char]) -> QuestionBank {
    let drafts = correct
        .iter()
        .enumerate()
        .map(|(i, &key)| QuestionDraft {
            number: (i + 1) as u32,
            prompt: format!("Question {}", i + 1),
            options: ('A'..='D')
                .map(|k| OptionDraft {
                    key: None,
                    text: format!("Option {}", k),
                    correct: k == key,
                })
                .collect(),
            explanation: None,
        })
        .collect();

    QuestionBank::new(
        Frontmatter {
            title: None,
            mode: None,
            duration_minutes: None,
            reveal_seconds: None,
        },
        "Test Bank".to_string(),
        Vec::new(),
        drafts,
        "test.md",
        "sha256:test",
    )
    .unwrap()
}

#[test]
fn test_ledger_replaces_instead_of_duplicating() {
    let mut ledger = AnswerLedger::new();
    assert_eq!(ledger.record(5, 'A', true), RecordOutcome::Inserted);
    assert_eq!(ledger.len(), 1);

    match ledger.record(5, 'B', false) {
        RecordOutcome::Replaced { previous } => {
            assert_eq!(previous.chosen, 'A');
            assert!(previous.correct);
        }
        other => panic!("Expected Replaced, got {:?}", other),
    }
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.get(5).unwrap().chosen, 'B');
    assert_eq!(ledger.correct_count(), 0);
}

#[test]
fn test_score_counts_correct_entries_only() {
    let bank = bank(&['A', 'B', 'C']);
    let mut ledger = AnswerLedger::new();
    ledger.record(1, 'A', true);
    ledger.record(2, 'D', false);

    let result = score::score(&bank, &ledger, 3, 45, false);
    assert_eq!(result.correct, 1);
    assert_eq!(result.considered, 3);
    assert_eq!(result.total, 3);
    assert_eq!(result.elapsed_secs, 45);

    assert_eq!(result.details.len(), 3);
    assert_eq!(result.details[0].outcome, ReviewOutcome::Correct);
    assert_eq!(result.details[0].chosen, Some('A'));
    assert_eq!(result.details[1].outcome, ReviewOutcome::Incorrect);
    assert_eq!(result.details[1].correct_key, 'B');
    // Absent ledger entry degrades to unanswered, never an error.
    assert_eq!(result.details[2].outcome, ReviewOutcome::Unanswered);
    assert_eq!(result.details[2].chosen, None);
}

#[test]
fn test_score_never_exceeds_bank_size() {
    let bank = bank(&['A', 'B']);
    let mut ledger = AnswerLedger::new();
    for _ in 0..10 {
        ledger.record(1, 'A', true);
        ledger.record(2, 'B', true);
    }
    let result = score::score(&bank, &ledger, 2, 0, false);
    assert_eq!(result.correct, 2);
    assert!(ledger.len() <= bank.len());
}

#[test]
fn test_percentage_rounds_to_integer() {
    assert_eq!(percentage(2, 3), 67);
    assert_eq!(percentage(1, 3), 33);
    assert_eq!(percentage(0, 3), 0);
    assert_eq!(percentage(3, 3), 100);
    assert_eq!(percentage(0, 0), 0);
}

#[test]
fn test_fixed_thirty_grade_one_decimal() {
    assert_eq!(grade_over_fixed_thirty(8), 2.7);
    assert_eq!(grade_over_fixed_thirty(15), 5.0);
    assert_eq!(grade_over_fixed_thirty(30), 10.0);
    assert_eq!(grade_over_fixed_thirty(0), 0.0);
    // The divisor is fixed at 30 even when the set is not.
    assert_eq!(grade_over_fixed_thirty(45), 15.0);
}

#[test]
fn test_ratio_grade_two_decimals() {
    assert_eq!(grade_out_of_ten(8, 30), 2.67);
    assert_eq!(grade_out_of_ten(1, 3), 3.33);
    assert_eq!(grade_out_of_ten(30, 30), 10.0);
    assert_eq!(grade_out_of_ten(0, 0), 0.0);
}

#[test]
fn test_pass_mark_is_a_raw_count() {
    assert!(!is_passing(17));
    assert!(is_passing(18));
    assert!(is_passing(30));
}

#[test]
fn test_tier_boundaries() {
    assert_eq!(score::tier(100), Tier::Excellent);
    assert_eq!(score::tier(80), Tier::Excellent);
    assert_eq!(score::tier(79), Tier::Good);
    assert_eq!(score::tier(60), Tier::Good);
    assert_eq!(score::tier(59), Tier::NeedsImprovement);
    assert_eq!(score::tier(40), Tier::NeedsImprovement);
    assert_eq!(score::tier(39), Tier::StudyAgain);
    assert_eq!(score::tier(0), Tier::StudyAgain);
}
