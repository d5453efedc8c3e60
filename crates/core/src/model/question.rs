use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors raised while building questions or a question bank.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {id} has an empty prompt")]
    EmptyPrompt { id: QuestionId },

    #[error("question {id} declares no choices")]
    NoChoices { id: QuestionId },

    #[error("question {id}: answer index {answer} out of range for {choices} choices")]
    AnswerOutOfRange {
        id: QuestionId,
        answer: usize,
        choices: usize,
    },

    #[error("duplicate question id: {0}")]
    DuplicateId(QuestionId),

    #[error("a question bank must contain at least one question")]
    EmptyBank,
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// One multiple-choice question: a prompt, its ordered choices, the index of
/// the correct choice, and the feedback shown after grading.
///
/// Content is static data defined at process start; immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionDraft")]
pub struct Question {
    id: QuestionId,
    prompt: String,
    choices: Vec<String>,
    answer: usize,
    feedback_correct: String,
    feedback_incorrect: String,
    points: u32,
}

/// Raw question shape as it appears in scenario files, validated into
/// [`Question`] on deserialization.
#[derive(Debug, Clone, Deserialize)]
struct QuestionDraft {
    id: QuestionId,
    prompt: String,
    choices: Vec<String>,
    answer: usize,
    feedback_correct: String,
    feedback_incorrect: String,
    #[serde(default = "default_points")]
    points: u32,
}

fn default_points() -> u32 {
    100
}

impl TryFrom<QuestionDraft> for Question {
    type Error = QuestionError;

    fn try_from(draft: QuestionDraft) -> Result<Self, Self::Error> {
        Question::new(
            draft.id,
            draft.prompt,
            draft.choices,
            draft.answer,
            draft.feedback_correct,
            draft.feedback_incorrect,
            draft.points,
        )
    }
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is empty, no choices are
    /// declared, or the answer index is out of range.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        choices: Vec<String>,
        answer: usize,
        feedback_correct: impl Into<String>,
        feedback_incorrect: impl Into<String>,
        points: u32,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt { id });
        }
        if choices.is_empty() {
            return Err(QuestionError::NoChoices { id });
        }
        if answer >= choices.len() {
            return Err(QuestionError::AnswerOutOfRange {
                id,
                answer,
                choices: choices.len(),
            });
        }

        Ok(Self {
            id,
            prompt,
            choices,
            answer,
            feedback_correct: feedback_correct.into(),
            feedback_incorrect: feedback_incorrect.into(),
            points,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// True when the submitted choice index selects the correct choice.
    ///
    /// Total over all inputs: an out-of-range index is simply not correct.
    #[must_use]
    pub fn is_correct(&self, submitted: usize) -> bool {
        submitted == self.answer
    }

    #[must_use]
    pub fn feedback_correct(&self) -> &str {
        &self.feedback_correct
    }

    #[must_use]
    pub fn feedback_incorrect(&self) -> &str {
        &self.feedback_incorrect
    }

    /// Points awarded for a correct answer (all or nothing).
    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }
}

//
// ─── QUESTION BANK ────────────────────────────────────────────────────────────
//

/// Ordered, read-only catalogue of the questions in one scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Build a bank from an ordered question list.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyBank` for an empty list and
    /// `QuestionError::DuplicateId` if two questions share an id.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionError> {
        if questions.is_empty() {
            return Err(QuestionError::EmptyBank);
        }
        let mut seen = BTreeSet::new();
        for question in &questions {
            if !seen.insert(question.id().clone()) {
                return Err(QuestionError::DuplicateId(question.id().clone()));
            }
        }
        Ok(Self { questions })
    }

    /// Number of questions in the bank.
    #[must_use]
    pub fn count(&self) -> usize {
        self.questions.len()
    }

    /// Question at the given zero-based position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Zero-based position of the question with the given id.
    #[must_use]
    pub fn position(&self, id: &QuestionId) -> Option<usize> {
        self.questions.iter().position(|q| q.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &QuestionId) -> bool {
        self.position(id).is_some()
    }

    /// Maximum attainable score across the whole bank.
    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.questions.iter().map(Question::points).sum()
    }

    /// Per-question award. Shipped banks award a uniform value; for mixed
    /// content this is the first question's points.
    #[must_use]
    pub fn points_per_question(&self) -> u32 {
        self.questions.first().map_or(0, Question::points)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }
}

impl<'a> IntoIterator for &'a QuestionBank {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn build_question(id: &str, answer: usize) -> Question {
        Question::new(
            QuestionId::new(id),
            "What is the right call?",
            vec!["first".into(), "second".into(), "third".into()],
            answer,
            "Well spotted.",
            "Not this one.",
            100,
        )
        .unwrap()
    }

    #[test]
    fn valid_question_builds() {
        let q = build_question("q1", 1);
        assert_eq!(q.id().as_str(), "q1");
        assert_eq!(q.choices().len(), 3);
        assert!(q.is_correct(1));
        assert!(!q.is_correct(0));
        assert!(!q.is_correct(99));
    }

    #[test]
    fn answer_index_must_be_in_range() {
        let err = Question::new(
            QuestionId::new("q1"),
            "Prompt",
            vec!["only".into()],
            3,
            "ok",
            "no",
            100,
        )
        .unwrap_err();
        assert!(matches!(err, QuestionError::AnswerOutOfRange { .. }));
    }

    #[test]
    fn empty_prompt_is_rejected() {
        let err = Question::new(
            QuestionId::new("q1"),
            "   ",
            vec!["a".into()],
            0,
            "ok",
            "no",
            100,
        )
        .unwrap_err();
        assert!(matches!(err, QuestionError::EmptyPrompt { .. }));
    }

    #[test]
    fn bank_rejects_duplicate_ids() {
        let err =
            QuestionBank::new(vec![build_question("q1", 0), build_question("q1", 1)]).unwrap_err();
        assert!(matches!(err, QuestionError::DuplicateId(_)));
    }

    #[test]
    fn bank_rejects_empty_list() {
        let err = QuestionBank::new(Vec::new()).unwrap_err();
        assert!(matches!(err, QuestionError::EmptyBank));
    }

    #[test]
    fn bank_lookups_work() {
        let bank = QuestionBank::new(vec![build_question("q1", 0), build_question("q2", 2)]).unwrap();
        assert_eq!(bank.count(), 2);
        assert_eq!(bank.get(1).unwrap().id().as_str(), "q2");
        assert!(bank.get(2).is_none());
        assert_eq!(bank.position(&QuestionId::new("q2")), Some(1));
        assert!(bank.contains(&QuestionId::new("q1")));
        assert!(!bank.contains(&QuestionId::new("q9")));
        assert_eq!(bank.max_score(), 200);
        assert_eq!(bank.points_per_question(), 100);
    }

    #[test]
    fn question_deserializes_with_validation() {
        let raw = r#"{
            "id": "q1",
            "prompt": "Pick one",
            "choices": ["a", "b"],
            "answer": 1,
            "feedback_correct": "yes",
            "feedback_incorrect": "no"
        }"#;
        let q: Question = serde_json::from_str(raw).unwrap();
        assert_eq!(q.points(), 100);
        assert!(q.is_correct(1));

        let bad = raw.replace("\"answer\": 1", "\"answer\": 9");
        assert!(serde_json::from_str::<Question>(&bad).is_err());
    }
}
