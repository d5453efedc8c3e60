#![forbid(unsafe_code)]

pub mod csv_log;
pub mod repository;

pub use csv_log::CsvAttemptLog;
pub use repository::{AttemptLog, AttemptRecord, DurationSecs, InMemoryAttemptLog, StorageError};
