use std::sync::mpsc;

use termexam::model::{Frontmatter, OptionDraft, QuestionBank, QuestionDraft};
use termexam::score::ReviewOutcome;
use termexam::session::{Phase, Rejection, Session, SessionMode, TimerOutcome};
use termexam::timer::{TimerEvent, TimerSignal};

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

fn exam(correct: &[char], total_secs: i64) -> (Session, mpsc::Receiver<TimerEvent>) {
    Session::start(bank(correct), SessionMode::TimedExam { total_secs })
}

#[test]
fn test_global_clock_armed_at_start() {
    let (session, _rx) = exam(&['A', 'B', 'C'], 1800);
    assert_eq!(session.remaining_global(), Some(1800));
    assert!(session.armed_generation().is_some());
    assert_eq!(session.phase(), Phase::AwaitingAnswer);
}

#[test]
fn test_select_option_at_any_position() {
    let (mut session, _rx) = exam(&['A', 'B', 'C', 'D'], 1800);
    session.select_option(0, 'A').unwrap();
    session.select_option(3, 'b').unwrap();
    assert_eq!(session.chosen_at(0), Some('A'));
    assert_eq!(session.chosen_at(3), Some('B'));
    assert_eq!(session.answered_count(), 2);

    assert_eq!(
        session.select_option(9, 'A'),
        Err(Rejection::OutOfRange(9))
    );
    assert_eq!(
        session.select_option(1, 'E'),
        Err(Rejection::UnknownOption('E'))
    );
}

#[test]
fn test_overwrite_replaces_instead_of_duplicating() {
    let (mut session, _rx) = exam(&['A', 'B'], 1800);
    session.select_option(0, 'A').unwrap();
    assert_eq!(session.correct_count(), 1);

    session.select_option(0, 'C').unwrap();
    assert_eq!(session.answered_count(), 1);
    assert_eq!(session.chosen_at(0), Some('C'));
    assert_eq!(session.correct_count(), 0);

    session.select_option(0, 'A').unwrap();
    assert_eq!(session.answered_count(), 1);
    assert_eq!(session.correct_count(), 1);
}

#[test]
fn test_jump_preserves_answers() {
    let (mut session, _rx) = exam(&['A', 'B', 'C', 'D', 'A'], 1800);
    session.select_option(0, 'A').unwrap();
    session.select_option(1, 'D').unwrap();

    session.jump_to(4).unwrap();
    assert_eq!(session.position(), 4);
    session.jump_to(0).unwrap();
    assert_eq!(session.position(), 0);
    assert_eq!(session.jump_to(5), Err(Rejection::OutOfRange(5)));

    assert_eq!(session.chosen_at(0), Some('A'));
    assert_eq!(session.chosen_at(1), Some('D'));
    assert_eq!(session.answered_count(), 2);
}

#[test]
fn test_drill_operations_rejected_in_exam() {
    let (mut session, _rx) = exam(&['A', 'B'], 1800);
    assert_eq!(session.submit_answer('A'), Err(Rejection::WrongMode));
    assert_eq!(session.advance(), Err(Rejection::WrongMode));
    assert_eq!(session.retreat(), Err(Rejection::WrongMode));
}

#[test]
fn test_finish_freezes_elapsed_from_remaining() {
    let (mut session, _rx) = exam(&['A', 'B', 'C'], 1800);
    let generation = session.armed_generation().unwrap();

    let outcome = session.handle_timer(TimerEvent {
        generation,
        signal: TimerSignal::Tick(1700),
    });
    assert_eq!(outcome, TimerOutcome::Ticked);

    session.finish().unwrap();
    let result = session.result().unwrap();
    assert_eq!(result.elapsed_secs, 100);
    assert!(!result.early_end);
    assert_eq!(result.considered, 3);
}

#[test]
fn test_expiry_forces_finish_with_full_elapsed() {
    let (mut session, _rx) = exam(&['A', 'B', 'C'], 1800);
    let generation = session.armed_generation().unwrap();
    session.select_option(0, 'A').unwrap();

    let outcome = session.handle_timer(TimerEvent {
        generation,
        signal: TimerSignal::Expired,
    });
    assert_eq!(outcome, TimerOutcome::TimeExpired);
    assert_eq!(session.phase(), Phase::Finished);

    let result = session.result().unwrap();
    assert_eq!(result.elapsed_secs, 1800);
    assert_eq!(result.correct, 1);

    assert_eq!(session.select_option(1, 'B'), Err(Rejection::SessionFinished));
    assert_eq!(session.jump_to(1), Err(Rejection::SessionFinished));
    assert_eq!(session.finish(), Err(Rejection::SessionFinished));
}

#[test]
fn test_stale_tick_ignored_after_finish() {
    let (mut session, _rx) = exam(&['A', 'B'], 1800);
    let generation = session.armed_generation().unwrap();
    session.finish().unwrap();

    let outcome = session.handle_timer(TimerEvent {
        generation,
        signal: TimerSignal::Tick(1500),
    });
    assert_eq!(outcome, TimerOutcome::Ignored);
    let result = session.result().unwrap();
    assert_eq!(result.elapsed_secs, 0);
}

#[test]
fn test_wrong_generation_tick_ignored() {
    let (mut session, _rx) = exam(&['A', 'B'], 1800);
    let generation = session.armed_generation().unwrap();

    let outcome = session.handle_timer(TimerEvent {
        generation: generation + 7,
        signal: TimerSignal::Tick(3),
    });
    assert_eq!(outcome, TimerOutcome::Ignored);
    assert_eq!(session.remaining_global(), Some(1800));
}

#[test]
fn test_early_end_scores_attempted_only() {
    // 30-question set, 10 answered correctly, then an early end.
    let correct: Vec<char> = std::iter::repeat('A').take(30).collect();
    let (mut session, _rx) = exam(&correct, 1800);

    for position in 0..10 {
        session.jump_to(position).unwrap();
        session.select_option(position, 'A').unwrap();
    }
    session.finish_early().unwrap();

    let result = session.result().unwrap();
    assert!(result.early_end);
    assert_eq!(result.considered, 10);
    assert_eq!(result.correct, 10);
    assert_eq!(result.total, 30);
    for review in &result.details[10..] {
        assert_eq!(review.outcome, ReviewOutcome::Unanswered);
        assert_eq!(review.chosen, None);
    }
}
