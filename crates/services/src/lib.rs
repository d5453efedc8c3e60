#![forbid(unsafe_code)]

pub mod certificate;
pub mod config;
pub mod leaderboard;
pub mod progression;

pub use training_core::Clock;
pub use training_core::model::IntakeError;

pub use certificate::{CertificateData, CertificateError, CertificateRenderer, TextCertificate};
pub use config::TrainingConfig;
pub use leaderboard::{LeaderboardService, ranked};
pub use progression::{
    AnswerOutcome, CertificateView, NavOutcome, ResetOutcome, SessionProgress, TrainingSession,
};
