//! Built-in training scenarios and external scenario loading.

mod data_protection;
mod factoring_law;

use serde::Deserialize;
use thiserror::Error;

use crate::model::{Question, QuestionBank, QuestionError};

pub use data_protection::data_protection;
pub use factoring_law::factoring_law;

/// Points awarded per question in the shipped scenarios.
pub const POINTS_PER_QUESTION: u32 = 100;

/// Errors raised while loading scenario content.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error("invalid scenario file: {0}")]
    Json(#[from] serde_json::Error),
}

/// One training scenario: a titled, ordered question bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    slug: String,
    title: String,
    bank: QuestionBank,
}

#[derive(Debug, Deserialize)]
struct ScenarioDraft {
    slug: String,
    title: String,
    questions: Vec<Question>,
}

impl Scenario {
    #[must_use]
    pub fn new(slug: impl Into<String>, title: impl Into<String>, bank: QuestionBank) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            bank,
        }
    }

    /// Load a scenario from a JSON document.
    ///
    /// Questions are validated on deserialization; duplicate ids are
    /// rejected when the bank is assembled.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` for malformed JSON or invalid content.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let draft: ScenarioDraft = serde_json::from_str(raw)?;
        let bank = QuestionBank::new(draft.questions)?;
        Ok(Self::new(draft.slug, draft.title, bank))
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }
}

/// Look up a built-in scenario by its slug.
#[must_use]
pub fn by_slug(slug: &str) -> Option<Scenario> {
    match slug {
        "factoring-law" => Some(factoring_law()),
        "data-protection" => Some(data_protection()),
        _ => None,
    }
}

/// Slugs of all built-in scenarios.
#[must_use]
pub fn builtin_slugs() -> &'static [&'static str] {
    &["factoring-law", "data-protection"]
}

/// Shared builder for static scenario content.
///
/// # Panics
///
/// Panics if the built-in content is invalid; exercised by the catalog tests.
pub(crate) fn question(
    id: &str,
    prompt: &str,
    choices: &[&str],
    answer: usize,
    feedback_correct: &str,
    feedback_incorrect: &str,
) -> Question {
    Question::new(
        crate::model::QuestionId::new(id),
        prompt,
        choices.iter().map(|c| (*c).to_owned()).collect(),
        answer,
        feedback_correct,
        feedback_incorrect,
        POINTS_PER_QUESTION,
    )
    .expect("built-in scenario content is valid")
}
