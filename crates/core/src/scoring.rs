//! Scoring rules: point awards and the certification threshold.

use crate::model::Question;

/// Fraction of the maximum attainable score required to certify.
pub const PASS_RATIO: f64 = 0.8;

/// Points earned for a graded question: full value when correct, zero
/// otherwise. This is the only place a score delta is produced.
#[must_use]
pub fn award(question: &Question, correct: bool) -> u32 {
    if correct { question.points() } else { 0 }
}

/// Minimum aggregate score required for a positive certificate outcome:
/// 80% of the maximum attainable score.
#[must_use]
pub fn pass_threshold(total_questions: usize, points_per_question: u32) -> f64 {
    let max_score = points_per_question as u64 * total_questions as u64;
    max_score as f64 * PASS_RATIO
}

#[must_use]
pub fn has_passed(score: u32, threshold: f64) -> bool {
    f64::from(score) >= threshold
}
