use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

use crate::model::ids::QuestionId;
use crate::model::trainee::TraineeProfile;

//
// ─── PAGE ─────────────────────────────────────────────────────────────────────
//

/// Position in the page sequence of a scenario with N questions:
/// intake (0), questions (1..=N), certificate (N+1), leaderboard (N+2).
///
/// `Question` holds the 1-based question number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Intake,
    Question(usize),
    Certificate,
    Leaderboard,
}

impl Page {
    /// Sequence index of this page for a scenario with `total` questions.
    #[must_use]
    pub fn index(&self, total: usize) -> usize {
        match self {
            Page::Intake => 0,
            Page::Question(n) => *n,
            Page::Certificate => total + 1,
            Page::Leaderboard => total + 2,
        }
    }

    /// Page at the given sequence index, if valid for `total` questions.
    #[must_use]
    pub fn from_index(index: usize, total: usize) -> Option<Page> {
        match index {
            0 => Some(Page::Intake),
            n if n <= total => Some(Page::Question(n)),
            n if n == total + 1 => Some(Page::Certificate),
            n if n == total + 2 => Some(Page::Leaderboard),
            _ => None,
        }
    }

    /// The following page in the sequence, if any.
    #[must_use]
    pub fn next(&self, total: usize) -> Option<Page> {
        Page::from_index(self.index(total) + 1, total)
    }

    /// The preceding page in the sequence, if any.
    #[must_use]
    pub fn prev(&self, total: usize) -> Option<Page> {
        self.index(total).checked_sub(1).and_then(|i| Page::from_index(i, total))
    }

    /// 1-based question number when this is a question page.
    #[must_use]
    pub fn question_number(&self) -> Option<usize> {
        match self {
            Page::Question(n) => Some(*n),
            _ => None,
        }
    }
}

//
// ─── SESSION STATE ────────────────────────────────────────────────────────────
//

/// Mutable state of one trainee's run through a scenario.
///
/// One instance per active trainee, created with zeroed defaults and mutated
/// only through the progression layer. Score can only grow via
/// [`SessionState::record_outcome`], which also owns the no-retry rule, so
/// `score == sum of points awarded for completed ids` holds by construction.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    trainee: Option<TraineeProfile>,
    score: u32,
    completed: BTreeSet<QuestionId>,
    cursor: Option<Page>,
    started_at: Option<DateTime<Utc>>,
    result_persisted: bool,
    reset_pending: bool,
}

impl SessionState {
    /// Fresh session at the intake page with zeroed progress.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture identity, start the duration timer, and move to the first
    /// question. Called once intake validation has succeeded.
    pub fn begin(&mut self, trainee: TraineeProfile, now: DateTime<Utc>) {
        self.trainee = Some(trainee);
        self.started_at = Some(now);
        self.cursor = Some(Page::Question(1));
    }

    /// Record the graded outcome for a question, awarding `delta` points.
    ///
    /// Returns `false` without mutating anything when the question was
    /// already completed: a question is graded at most once, and a repeated
    /// grade call must never change the score.
    pub fn record_outcome(&mut self, id: QuestionId, delta: u32) -> bool {
        if !self.completed.insert(id) {
            return false;
        }
        self.score += delta;
        true
    }

    #[must_use]
    pub fn is_completed(&self, id: &QuestionId) -> bool {
        self.completed.contains(id)
    }

    #[must_use]
    pub fn trainee(&self) -> Option<&TraineeProfile> {
        self.trainee.as_ref()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Ids of the questions graded so far.
    #[must_use]
    pub fn completed(&self) -> &BTreeSet<QuestionId> {
        &self.completed
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Current page; `Page::Intake` until the session begins.
    #[must_use]
    pub fn cursor(&self) -> Page {
        self.cursor.unwrap_or(Page::Intake)
    }

    /// Move the cursor. Callers keep it within the scenario's page sequence.
    pub fn set_cursor(&mut self, page: Page) {
        self.cursor = Some(page);
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Elapsed seconds since intake, if the timer has started.
    #[must_use]
    pub fn duration_seconds(&self, now: DateTime<Utc>) -> Option<f64> {
        self.started_at
            .map(|start| (now - start).num_milliseconds() as f64 / 1000.0)
    }

    #[must_use]
    pub fn result_persisted(&self) -> bool {
        self.result_persisted
    }

    /// Latch the one-shot guard against duplicate passing-result writes.
    pub fn mark_persisted(&mut self) {
        self.result_persisted = true;
    }

    #[must_use]
    pub fn reset_pending(&self) -> bool {
        self.reset_pending
    }

    pub fn set_reset_pending(&mut self, pending: bool) {
        self.reset_pending = pending;
    }

    /// Discard all progress: zero score, no completions, cursor back to
    /// intake, timer and persistence guard cleared.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn profile() -> TraineeProfile {
        TraineeProfile::new("Jane", "jane@myfiducia.com", "@myfiducia.com").unwrap()
    }

    #[test]
    fn page_indices_round_trip() {
        let total = 10;
        for index in 0..=total + 2 {
            let page = Page::from_index(index, total).unwrap();
            assert_eq!(page.index(total), index);
        }
        assert!(Page::from_index(total + 3, total).is_none());
    }

    #[test]
    fn page_next_and_prev_walk_the_sequence() {
        let total = 2;
        assert_eq!(Page::Intake.next(total), Some(Page::Question(1)));
        assert_eq!(Page::Question(2).next(total), Some(Page::Certificate));
        assert_eq!(Page::Certificate.next(total), Some(Page::Leaderboard));
        assert_eq!(Page::Leaderboard.next(total), None);
        assert_eq!(Page::Question(1).prev(total), Some(Page::Intake));
        assert_eq!(Page::Intake.prev(total), None);
    }

    #[test]
    fn fresh_session_is_zeroed_at_intake() {
        let state = SessionState::new();
        assert_eq!(state.score(), 0);
        assert_eq!(state.completed_count(), 0);
        assert_eq!(state.cursor(), Page::Intake);
        assert!(state.trainee().is_none());
        assert!(state.started_at().is_none());
    }

    #[test]
    fn begin_starts_timer_and_moves_to_first_question() {
        let mut state = SessionState::new();
        state.begin(profile(), fixed_now());
        assert_eq!(state.cursor(), Page::Question(1));
        assert_eq!(state.started_at(), Some(fixed_now()));
        assert_eq!(state.trainee().unwrap().name(), "Jane");
    }

    #[test]
    fn record_outcome_awards_once_and_only_once() {
        let mut state = SessionState::new();
        let id = QuestionId::new("q1");

        assert!(state.record_outcome(id.clone(), 100));
        assert_eq!(state.score(), 100);
        assert!(state.is_completed(&id));

        // Second grade for the same id: no score change, no error.
        assert!(!state.record_outcome(id.clone(), 100));
        assert_eq!(state.score(), 100);
        assert_eq!(state.completed_count(), 1);
    }

    #[test]
    fn zero_point_outcomes_still_complete_the_question() {
        let mut state = SessionState::new();
        let id = QuestionId::new("q1");
        assert!(state.record_outcome(id.clone(), 0));
        assert_eq!(state.score(), 0);
        assert!(state.is_completed(&id));
    }

    #[test]
    fn duration_counts_from_begin() {
        let mut state = SessionState::new();
        assert!(state.duration_seconds(fixed_now()).is_none());

        state.begin(profile(), fixed_now());
        let later = fixed_now() + chrono::Duration::seconds(95);
        let elapsed = state.duration_seconds(later).unwrap();
        assert!((elapsed - 95.0).abs() < f64::EPSILON);
    }

    #[test]
    fn reset_returns_everything_to_defaults() {
        let mut state = SessionState::new();
        state.begin(profile(), fixed_now());
        state.record_outcome(QuestionId::new("q1"), 100);
        state.set_cursor(Page::Certificate);
        state.mark_persisted();
        state.set_reset_pending(true);

        state.reset();

        assert_eq!(state.score(), 0);
        assert_eq!(state.completed_count(), 0);
        assert_eq!(state.cursor(), Page::Intake);
        assert!(state.trainee().is_none());
        assert!(state.started_at().is_none());
        assert!(!state.result_persisted());
        assert!(!state.reset_pending());
    }
}
