mod ids;
mod outcome;
mod question;
mod session;
mod trainee;

pub use ids::{ParseIdError, QuestionId};
pub use outcome::{Verdict, evaluate};
pub use question::{Question, QuestionBank, QuestionError};
pub use session::{Page, SessionState};
pub use trainee::{IntakeError, TraineeProfile};
