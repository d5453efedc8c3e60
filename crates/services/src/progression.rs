use std::sync::Arc;

use training_core::Clock;
use training_core::catalog::Scenario;
use training_core::model::{IntakeError, Page, Question, SessionState, TraineeProfile, evaluate};
use training_core::scoring;

use storage::{AttemptLog, AttemptRecord, DurationSecs};

use crate::certificate::CertificateData;
use crate::config::TrainingConfig;
use crate::leaderboard;

//
// ─── COMMAND OUTCOMES ─────────────────────────────────────────────────────────
//

/// Result of submitting an answer on the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The question was graded (first and only time) and the cursor moved on.
    Graded {
        correct: bool,
        message: String,
        points_awarded: u32,
    },
    /// The question was already graded; nothing changed.
    AlreadyAnswered,
    /// The current page takes no answers.
    NotAQuestion,
}

/// Result of a navigation command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    Moved(Page),
    /// Navigation refused; the cursor did not move.
    Blocked { message: String },
}

/// Result of the two-step reset flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// First call: the reset is armed and must be confirmed or cancelled.
    ConfirmationRequired,
    ResetDone,
    Cancelled,
}

/// What the certificate page shows, depending on completion and score.
#[derive(Debug, Clone, PartialEq)]
pub enum CertificateView {
    /// Not all questions attempted yet.
    Incomplete { completed: usize, total: usize },
    /// Passed; the attempt has been persisted (once).
    Passed { certificate: CertificateData },
    /// All questions attempted but below the threshold; the attempt is
    /// persisted on every view.
    Failed { score: u32, threshold: f64 },
}

/// Aggregated view of session progress, useful for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub score: u32,
}

//
// ─── TRAINING SESSION ─────────────────────────────────────────────────────────
//

/// The progression state machine for one trainee's run through a scenario.
///
/// Owns the session state and exposes the full command surface: intake,
/// answer grading with auto-advance, gated forward navigation, ungated
/// review navigation, the two-step reset, certificate issuance, and the
/// leaderboard view. Commands never fail past this boundary; refused actions
/// come back as outcome descriptors with a user-visible message and the
/// state untouched.
pub struct TrainingSession {
    scenario: Scenario,
    config: TrainingConfig,
    clock: Clock,
    log: Arc<dyn AttemptLog>,
    state: SessionState,
}

impl TrainingSession {
    #[must_use]
    pub fn new(
        scenario: Scenario,
        config: TrainingConfig,
        clock: Clock,
        log: Arc<dyn AttemptLog>,
    ) -> Self {
        Self {
            scenario,
            config,
            clock,
            log,
            state: SessionState::new(),
        }
    }

    #[must_use]
    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn cursor(&self) -> Page {
        self.state.cursor()
    }

    /// The question under the cursor, when on a question page.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        let number = self.state.cursor().question_number()?;
        self.scenario.bank().get(number - 1)
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.scenario.bank().count();
        let answered = self.state.completed_count();
        SessionProgress {
            total,
            answered,
            remaining: total.saturating_sub(answered),
            score: self.state.score(),
        }
    }

    /// Validate trainee identity and start the session: timer running,
    /// cursor on the first question.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError` with a user-visible message; the session stays
    /// at intake, untouched.
    pub fn begin(&mut self, name: &str, email: &str) -> Result<(), IntakeError> {
        let profile = TraineeProfile::new(name, email, self.config.email_domain())?;
        self.state.begin(profile, self.clock.now());
        Ok(())
    }

    /// Grade the submitted choice for the current question.
    ///
    /// Each question is attempted exactly once: grading awards points (full
    /// value or zero), records completion, and auto-advances to the next
    /// page regardless of correctness. Re-submitting for an already-graded
    /// question is a no-op.
    pub fn submit_answer(&mut self, choice: usize) -> AnswerOutcome {
        let Some(number) = self.state.cursor().question_number() else {
            return AnswerOutcome::NotAQuestion;
        };
        let question = self
            .scenario
            .bank()
            .get(number - 1)
            .expect("cursor stays within the question bank");

        if self.state.is_completed(question.id()) {
            return AnswerOutcome::AlreadyAnswered;
        }

        let verdict = evaluate(question, choice);
        let points_awarded = scoring::award(question, verdict.correct);
        let id = question.id().clone();

        self.state.record_outcome(id, points_awarded);
        self.advance_cursor();

        AnswerOutcome::Graded {
            correct: verdict.correct,
            message: verdict.message,
            points_awarded,
        }
    }

    /// Explicit forward navigation. Gated: moving past an unanswered
    /// question is refused with a message and no cursor change.
    pub fn go_next(&mut self) -> NavOutcome {
        let cursor = self.state.cursor();
        if let Some(number) = cursor.question_number() {
            let question = self
                .scenario
                .bank()
                .get(number - 1)
                .expect("cursor stays within the question bank");
            if !self.state.is_completed(question.id()) {
                return NavOutcome::Blocked {
                    message: "Please complete the question first!".to_owned(),
                };
            }
        }

        match cursor.next(self.scenario.bank().count()) {
            Some(next) => {
                self.state.set_cursor(next);
                NavOutcome::Moved(next)
            }
            None => NavOutcome::Blocked {
                message: "You have reached the end.".to_owned(),
            },
        }
    }

    /// Backward navigation, always permitted while not at intake. Reviewing
    /// an answered question never re-opens scoring.
    pub fn go_previous(&mut self) -> NavOutcome {
        match self.state.cursor().prev(self.scenario.bank().count()) {
            Some(previous) => {
                self.state.set_cursor(previous);
                NavOutcome::Moved(previous)
            }
            None => NavOutcome::Blocked {
                message: "Already at the start.".to_owned(),
            },
        }
    }

    /// Direct navigation to any page of the scenario, ungated: the
    /// certificate page itself refuses to certify an incomplete session, so
    /// jumping ahead only ever shows progress, never skips grading.
    pub fn jump_to(&mut self, page: Page) -> NavOutcome {
        let total = self.scenario.bank().count();
        if Page::from_index(page.index(total), total) != Some(page) {
            return NavOutcome::Blocked {
                message: "No such page in this scenario.".to_owned(),
            };
        }
        self.state.set_cursor(page);
        NavOutcome::Moved(page)
    }

    /// Two-step session reset. The first call only arms the confirmation;
    /// a second call with `confirm = true` discards all progress, with
    /// `confirm = false` cancels.
    pub fn reset(&mut self, confirm: bool) -> ResetOutcome {
        if !self.state.reset_pending() {
            self.state.set_reset_pending(true);
            return ResetOutcome::ConfirmationRequired;
        }
        if confirm {
            self.state.reset();
            ResetOutcome::ResetDone
        } else {
            self.state.set_reset_pending(false);
            ResetOutcome::Cancelled
        }
    }

    /// Evaluate the certificate page.
    ///
    /// Passing results are persisted exactly once per session; a failing but
    /// fully-attempted result is persisted on every view, since the only way
    /// forward from there is a reset and each failed completion is logged.
    /// Persistence problems are logged and never block the session.
    pub fn view_certificate(&mut self) -> CertificateView {
        let total = self.scenario.bank().count();
        let completed = self.state.completed_count();
        if completed < total {
            return CertificateView::Incomplete { completed, total };
        }

        let threshold =
            scoring::pass_threshold(total, self.scenario.bank().points_per_question());
        if scoring::has_passed(self.state.score(), threshold) {
            if !self.state.result_persisted() {
                self.persist_attempt();
                self.state.mark_persisted();
            }
            CertificateView::Passed {
                certificate: self.certificate_data(),
            }
        } else {
            self.persist_attempt();
            CertificateView::Failed {
                score: self.state.score(),
                threshold,
            }
        }
    }

    /// Data for the exported certificate document.
    #[must_use]
    pub fn certificate_data(&self) -> CertificateData {
        let name = self
            .state
            .trainee()
            .map(TraineeProfile::name)
            .unwrap_or_default()
            .to_owned();
        CertificateData {
            name,
            score: self.state.score(),
            max_score: self.scenario.bank().max_score(),
            issued_on: self.clock.now(),
        }
    }

    /// Ranked leaderboard over all persisted attempts. An unreadable store
    /// yields an empty board with a warning rather than an error.
    #[must_use]
    pub fn leaderboard(&self) -> Vec<AttemptRecord> {
        match self.log.read_all() {
            Ok(records) => leaderboard::ranked(records),
            Err(err) => {
                log::warn!("could not load the leaderboard: {err}");
                Vec::new()
            }
        }
    }

    fn advance_cursor(&mut self) {
        if let Some(next) = self.state.cursor().next(self.scenario.bank().count()) {
            self.state.set_cursor(next);
        }
    }

    fn persist_attempt(&self) {
        let Some(trainee) = self.state.trainee() else {
            return;
        };
        let now = self.clock.now();
        let record = AttemptRecord {
            recorded_at: now,
            name: trainee.name().to_owned(),
            email: trainee.email().to_owned(),
            score: self.state.score(),
            fully_completed: self.state.completed_count() == self.scenario.bank().count(),
            duration: DurationSecs::from(self.state.duration_seconds(now)),
        };
        if let Err(err) = self.log.append(&record) {
            log::warn!("failed to record training attempt: {err}");
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
