//! End-to-end flows over the command interface: full runs from intake to
//! certificate, persistence rules, and leaderboard ordering.

use std::sync::Arc;

use services::{
    AnswerOutcome, CertificateView, NavOutcome, ResetOutcome, TrainingConfig, TrainingSession,
};
use storage::{AttemptLog, DurationSecs, InMemoryAttemptLog};
use training_core::catalog;
use training_core::model::Page;
use training_core::time::{fixed_clock, fixed_now};
use training_core::Clock;

fn build_session(clock: Clock) -> (TrainingSession, Arc<InMemoryAttemptLog>) {
    let log = Arc::new(InMemoryAttemptLog::new());
    let session = TrainingSession::new(
        catalog::factoring_law(),
        TrainingConfig::default(),
        clock,
        log.clone(),
    );
    (session, log)
}

/// Answer every question; `correct` picks right or deliberately wrong.
fn answer_all(session: &mut TrainingSession, correct: &dyn Fn(usize) -> bool) {
    let total = session.scenario().bank().count();
    for n in 1..=total {
        assert_eq!(session.cursor(), Page::Question(n));
        let question = session.current_question().unwrap();
        let right = (0..question.choices().len())
            .find(|&i| question.is_correct(i))
            .unwrap();
        let choice = if correct(n) {
            right
        } else {
            (right + 1) % question.choices().len()
        };
        let outcome = session.submit_answer(choice);
        assert!(matches!(outcome, AnswerOutcome::Graded { .. }));
    }
}

#[test]
fn perfect_run_certifies_and_persists_exactly_once() {
    let (mut session, log) = build_session(Clock::fixed(fixed_now()));
    session.begin("Jane Doe", "jane.doe@myfiducia.com").unwrap();

    answer_all(&mut session, &|_| true);
    assert_eq!(session.cursor(), Page::Certificate);
    assert_eq!(session.progress().score, 1000);

    let first = session.view_certificate();
    let CertificateView::Passed { certificate } = first else {
        panic!("expected a pass, got {first:?}");
    };
    assert_eq!(certificate.name, "Jane Doe");
    assert_eq!(certificate.score, 1000);
    assert_eq!(certificate.max_score, 1000);

    // Re-viewing the certificate must not duplicate the row.
    session.view_certificate();
    session.view_certificate();

    let records = log.read_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].score, 1000);
    assert!(records[0].fully_completed);
    assert_eq!(records[0].email, "jane.doe@myfiducia.com");
    assert_eq!(records[0].duration, DurationSecs::Known(0.0));
}

#[test]
fn failing_run_is_persisted_on_every_certificate_view() {
    let (mut session, log) = build_session(fixed_clock());
    session.begin("Omar", "omar@myfiducia.com").unwrap();

    // Seven of ten correct: 700 < 800 threshold.
    answer_all(&mut session, &|n| n <= 7);
    assert_eq!(session.progress().score, 700);

    let view = session.view_certificate();
    assert!(matches!(
        view,
        CertificateView::Failed { score: 700, threshold } if (threshold - 800.0).abs() < f64::EPSILON
    ));

    // Intentional non-dedup: each failed view logs the attempt again.
    session.view_certificate();

    let records = log.read_all().unwrap();
    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record.score, 700);
        assert!(record.fully_completed);
    }
}

#[test]
fn exactly_eighty_percent_passes() {
    let (mut session, log) = build_session(fixed_clock());
    session.begin("Ada", "ada@myfiducia.com").unwrap();

    answer_all(&mut session, &|n| n <= 8);
    assert_eq!(session.progress().score, 800);

    assert!(matches!(
        session.view_certificate(),
        CertificateView::Passed { .. }
    ));
    assert_eq!(log.read_all().unwrap().len(), 1);
}

#[test]
fn wrong_domain_intake_keeps_the_session_at_the_start() {
    let (mut session, log) = build_session(fixed_clock());

    let err = session.begin("Jane", "a@wrongdomain.com").unwrap_err();
    assert!(err.to_string().contains("@myfiducia.com"));
    assert_eq!(session.cursor(), Page::Intake);
    assert_eq!(session.progress().answered, 0);
    assert!(log.read_all().unwrap().is_empty());
}

#[test]
fn score_always_matches_completed_awards() {
    let (mut session, _) = build_session(fixed_clock());
    session.begin("Jane", "jane@myfiducia.com").unwrap();

    // Alternate right and wrong answers; after every submission the score
    // equals 100 x the number of correct completions.
    let total = session.scenario().bank().count();
    let mut expected = 0;
    for n in 1..=total {
        let question = session.current_question().unwrap();
        let right = (0..question.choices().len())
            .find(|&i| question.is_correct(i))
            .unwrap();
        if n % 2 == 1 {
            session.submit_answer(right);
            expected += 100;
        } else {
            session.submit_answer((right + 1) % question.choices().len());
        }
        assert_eq!(session.progress().score, expected);
        assert_eq!(session.progress().answered, n);
    }
}

#[test]
fn leaderboard_ranks_across_sessions() {
    let log = Arc::new(InMemoryAttemptLog::new());

    // Perfect run.
    let mut session = TrainingSession::new(
        catalog::factoring_law(),
        TrainingConfig::default(),
        fixed_clock(),
        log.clone(),
    );
    session.begin("Ace", "ace@myfiducia.com").unwrap();
    answer_all(&mut session, &|_| true);
    session.view_certificate();

    // Failing run on the same log.
    let mut failing = TrainingSession::new(
        catalog::factoring_law(),
        TrainingConfig::default(),
        fixed_clock(),
        log.clone(),
    );
    failing.begin("Low", "low@myfiducia.com").unwrap();
    answer_all(&mut failing, &|n| n <= 3);
    failing.view_certificate();

    let board = session.leaderboard();
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].name, "Ace");
    assert_eq!(board[0].score, 1000);
    assert_eq!(board[1].name, "Low");
    assert_eq!(board[1].score, 300);
}

#[test]
fn reset_after_failure_allows_a_fresh_run() {
    let (mut session, log) = build_session(fixed_clock());
    session.begin("Omar", "omar@myfiducia.com").unwrap();
    answer_all(&mut session, &|_| false);
    assert!(matches!(
        session.view_certificate(),
        CertificateView::Failed { score: 0, .. }
    ));

    assert_eq!(session.reset(true), ResetOutcome::ConfirmationRequired);
    assert_eq!(session.reset(true), ResetOutcome::ResetDone);
    assert_eq!(session.cursor(), Page::Intake);

    // Second run passes and appends its own row after the failed one.
    session.begin("Omar", "omar@myfiducia.com").unwrap();
    answer_all(&mut session, &|_| true);
    assert!(matches!(
        session.view_certificate(),
        CertificateView::Passed { .. }
    ));

    let records = log.read_all().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].score, 0);
    assert_eq!(records[1].score, 1000);
}

#[test]
fn certificate_page_reachable_only_through_the_gate() {
    let (mut session, _) = build_session(fixed_clock());
    session.begin("Jane", "jane@myfiducia.com").unwrap();

    // Explicit navigation cannot pass the first unanswered question.
    assert!(matches!(session.go_next(), NavOutcome::Blocked { .. }));

    // Jumping ahead shows only the locked view.
    session.jump_to(Page::Certificate);
    assert!(matches!(
        session.view_certificate(),
        CertificateView::Incomplete { .. }
    ));

    // And past the certificate sits the leaderboard, then the end.
    assert_eq!(session.go_next(), NavOutcome::Moved(Page::Leaderboard));
    assert!(matches!(session.go_next(), NavOutcome::Blocked { .. }));
}
