use thiserror::Error;

use crate::catalog::CatalogError;
use crate::model::IntakeError;
use crate::model::QuestionError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
