use std::sync::mpsc;

use termexam::model::{Frontmatter, OptionDraft, QuestionBank, QuestionDraft};
use termexam::session::{Advance, Phase, Rejection, Session, SessionMode, TimerOutcome};
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

fn drill(correct: &[char]) -> (Session, mpsc::Receiver<TimerEvent>) {
    Session::start(
        bank(correct),
        SessionMode::RevealDrill {
            advance_window_secs: 30,
        },
    )
}

#[test]
fn test_submit_reveals_and_arms_countdown() {
    let (mut session, _rx) = drill(&['A', 'B', 'C']);
    assert_eq!(session.phase(), Phase::AwaitingAnswer);
    assert_eq!(session.remaining_question(), None);
    assert_eq!(session.armed_generation(), None);

    let submission = session.submit_answer('a').unwrap();
    assert!(submission.correct);
    assert_eq!(session.phase(), Phase::Revealed);
    assert_eq!(session.remaining_question(), Some(30));
    assert!(session.armed_generation().is_some());
}

#[test]
fn test_resubmit_while_revealed_rejected() {
    let (mut session, _rx) = drill(&['A', 'B', 'C']);
    session.submit_answer('A').unwrap();

    assert_eq!(session.submit_answer('B'), Err(Rejection::AlreadyRevealed));
    assert_eq!(session.answered_count(), 1);
    assert_eq!(session.chosen_at(0), Some('A'));
    assert_eq!(session.correct_count(), 1);
}

#[test]
fn test_unknown_option_rejected_without_state_change() {
    let (mut session, _rx) = drill(&['A', 'B']);
    assert_eq!(session.submit_answer('Z'), Err(Rejection::UnknownOption('Z')));
    assert_eq!(session.phase(), Phase::AwaitingAnswer);
    assert_eq!(session.answered_count(), 0);
}

#[test]
fn test_full_run_two_of_three_correct() {
    // Correct keys A, B, C; the user answers A, B, D — last one wrong.
    let (mut session, _rx) = drill(&['A', 'B', 'C']);

    session.submit_answer('A').unwrap();
    assert_eq!(session.advance().unwrap(), Advance::Moved);
    session.submit_answer('B').unwrap();
    assert_eq!(session.advance().unwrap(), Advance::Moved);
    session.submit_answer('D').unwrap();
    assert_eq!(session.advance().unwrap(), Advance::Finished);

    assert_eq!(session.phase(), Phase::Finished);
    assert_eq!(session.armed_generation(), None);
    assert_eq!(session.remaining_question(), None);

    let result = session.result().unwrap();
    assert_eq!(result.correct, 2);
    assert_eq!(result.considered, 3);
    assert!(!result.early_end);
    assert_eq!(result.details[2].chosen, Some('D'));
    assert_eq!(
        result.details[2].outcome,
        termexam::score::ReviewOutcome::Incorrect
    );
}

#[test]
fn test_advance_requires_reveal() {
    let (mut session, _rx) = drill(&['A', 'B']);
    assert_eq!(session.advance(), Err(Rejection::NotRevealed));
    assert_eq!(session.retreat(), Err(Rejection::AtFirstQuestion));
}

#[test]
fn test_exam_operations_rejected_in_drill() {
    let (mut session, _rx) = drill(&['A', 'B']);
    assert_eq!(session.select_option(0, 'A'), Err(Rejection::WrongMode));
    assert_eq!(session.jump_to(1), Err(Rejection::WrongMode));
    assert_eq!(session.finish(), Err(Rejection::WrongMode));
}

#[test]
fn test_retreat_reviews_without_timer() {
    let (mut session, _rx) = drill(&['A', 'B', 'C']);
    session.submit_answer('A').unwrap();
    session.advance().unwrap();
    assert_eq!(session.phase(), Phase::AwaitingAnswer);

    session.retreat().unwrap();
    assert_eq!(session.position(), 0);
    assert_eq!(session.phase(), Phase::Revealed);
    // Reviewing a past answer must not consume time.
    assert_eq!(session.remaining_question(), None);
    assert_eq!(session.armed_generation(), None);
    assert_eq!(session.chosen_at(0), Some('A'));
}

#[test]
fn test_revisiting_answered_question_keeps_score() {
    let (mut session, _rx) = drill(&['A', 'B', 'C']);
    session.submit_answer('A').unwrap();
    session.advance().unwrap();
    session.submit_answer('D').unwrap();
    session.advance().unwrap();
    assert_eq!(session.correct_count(), 1);

    // Walk back over both answered questions, then forward again.
    session.retreat().unwrap();
    session.retreat().unwrap();
    assert_eq!(session.phase(), Phase::Revealed);
    session.advance().unwrap();
    assert_eq!(session.phase(), Phase::Revealed);
    assert_eq!(session.remaining_question(), None);
    session.advance().unwrap();
    assert_eq!(session.phase(), Phase::AwaitingAnswer);

    assert_eq!(session.correct_count(), 1);
    assert_eq!(session.answered_count(), 2);
    assert_eq!(session.chosen_at(1), Some('D'));
}

#[test]
fn test_finish_early_records_attempted_count() {
    let (mut session, _rx) = drill(&['A', 'B', 'C', 'D', 'A']);
    session.submit_answer('A').unwrap();
    session.advance().unwrap();
    session.submit_answer('C').unwrap();
    session.advance().unwrap();

    // On the third question now.
    session.finish_early().unwrap();
    assert_eq!(session.phase(), Phase::Finished);

    let result = session.result().unwrap();
    assert!(result.early_end);
    assert_eq!(result.considered, 3);
    assert_eq!(result.correct, 1);
    assert_eq!(result.total, 5);
}

#[test]
fn test_countdown_expiry_auto_advances() {
    let (mut session, _rx) = drill(&['A', 'B', 'C']);
    session.submit_answer('A').unwrap();
    let generation = session.armed_generation().unwrap();

    let outcome = session.handle_timer(TimerEvent {
        generation,
        signal: TimerSignal::Tick(12),
    });
    assert_eq!(outcome, TimerOutcome::Ticked);
    assert_eq!(session.remaining_question(), Some(12));

    let outcome = session.handle_timer(TimerEvent {
        generation,
        signal: TimerSignal::Expired,
    });
    assert_eq!(outcome, TimerOutcome::AutoAdvanced);
    assert_eq!(session.position(), 1);
    assert_eq!(session.phase(), Phase::AwaitingAnswer);
}

#[test]
fn test_stale_expiry_after_retreat_ignored() {
    let (mut session, _rx) = drill(&['A', 'B', 'C']);
    session.submit_answer('A').unwrap();
    session.advance().unwrap();
    session.submit_answer('B').unwrap();
    let generation = session.armed_generation().unwrap();

    // Leaving the question disarms its countdown; the expiry that was
    // already in flight must not advance from the new position.
    session.retreat().unwrap();
    let outcome = session.handle_timer(TimerEvent {
        generation,
        signal: TimerSignal::Expired,
    });
    assert_eq!(outcome, TimerOutcome::Ignored);
    assert_eq!(session.position(), 0);
    assert_eq!(session.phase(), Phase::Revealed);
}

#[test]
fn test_superseded_generation_ignored() {
    let (mut session, _rx) = drill(&['A', 'B', 'C']);
    session.submit_answer('D').unwrap();
    session.advance().unwrap();
    session.submit_answer('B').unwrap();
    let current = session.armed_generation().unwrap();

    let outcome = session.handle_timer(TimerEvent {
        generation: current - 1,
        signal: TimerSignal::Expired,
    });
    assert_eq!(outcome, TimerOutcome::Ignored);
    assert_eq!(session.position(), 1);
}

#[test]
fn test_mutations_rejected_after_finish() {
    let (mut session, _rx) = drill(&['A', 'B']);
    session.finish_early().unwrap();

    assert_eq!(session.submit_answer('A'), Err(Rejection::SessionFinished));
    assert_eq!(session.advance(), Err(Rejection::SessionFinished));
    assert_eq!(session.retreat(), Err(Rejection::SessionFinished));
    assert_eq!(session.finish_early(), Err(Rejection::SessionFinished));

    let outcome = session.handle_timer(TimerEvent {
        generation: 1,
        signal: TimerSignal::Expired,
    });
    assert_eq!(outcome, TimerOutcome::Ignored);
}

#[test]
fn test_result_only_after_finish() {
    let (session, _rx) = drill(&['A', 'B']);
    assert!(matches!(session.result(), Err(Rejection::NotFinished)));
}
