use crate::model::question::Question;

/// Graded result for one submitted choice: correctness plus the feedback
/// message to show the trainee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub correct: bool,
    pub message: String,
}

/// Grade a submitted choice against a question.
///
/// Deterministic and total: any unrecognized (out-of-range) choice index is
/// treated as incorrect. No side effects; the caller decides what to do with
/// the verdict.
#[must_use]
pub fn evaluate(question: &Question, submitted: usize) -> Verdict {
    let correct = question.is_correct(submitted);
    let message = if correct {
        format!("Correct! {}", question.feedback_correct())
    } else {
        format!("Incorrect. {}", question.feedback_incorrect())
    };
    Verdict { correct, message }
}
