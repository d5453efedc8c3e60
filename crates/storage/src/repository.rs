use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by attempt-log backends.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("log format error: {0}")]
    Csv(#[from] csv::Error),

    #[error("lock poisoned")]
    Poisoned,
}

/// Sentinel stored for rows that predate the `Email` column.
pub const EMAIL_SENTINEL: &str = "N/A";

/// Sentinel stored for rows that predate the `DurationSeconds` column.
pub const DURATION_SENTINEL: &str = "unknown";

// Magic value an earlier writer used where duration was not measured.
const LEGACY_DURATION_SENTINEL: f64 = 999_999.0;

//
// ─── DURATION ─────────────────────────────────────────────────────────────────
//

/// Elapsed completion time of an attempt, in seconds.
///
/// `Unknown` covers rows written before duration tracking existed; it is
/// persisted as the string sentinel `"unknown"` and always ranks after any
/// known duration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DurationSecs {
    Known(f64),
    #[default]
    Unknown,
}

impl DurationSecs {
    /// Parse a stored field. Anything that is not a sensible number of
    /// seconds (including the legacy `999999` magic value) is `Unknown`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 && v < LEGACY_DURATION_SENTINEL => Self::Known(v),
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn known(self) -> Option<f64> {
        match self {
            Self::Known(v) => Some(v),
            Self::Unknown => None,
        }
    }

    #[must_use]
    pub fn is_known(self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl From<Option<f64>> for DurationSecs {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Unknown, Self::Known)
    }
}

impl Serialize for DurationSecs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Known(v) => serializer.serialize_f64(*v),
            Self::Unknown => serializer.serialize_str(DURATION_SENTINEL),
        }
    }
}

impl<'de> Deserialize<'de> for DurationSecs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

//
// ─── ATTEMPT RECORD ───────────────────────────────────────────────────────────
//

/// One persisted row of the training log: a finished (or fully attempted but
/// failed) session. Field names mirror the store's canonical column set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    #[serde(rename = "Timestamp", with = "timestamp_format")]
    pub recorded_at: DateTime<Utc>,

    #[serde(rename = "Username")]
    pub name: String,

    #[serde(rename = "Email")]
    pub email: String,

    #[serde(rename = "Score")]
    pub score: u32,

    #[serde(rename = "Completed", with = "flexible_bool")]
    pub fully_completed: bool,

    #[serde(rename = "DurationSeconds")]
    pub duration: DurationSecs,
}

/// Wall-clock timestamps in the legacy `%Y-%m-%d %H:%M:%S` layout, kept for
/// compatibility with logs written by earlier revisions.
mod timestamp_format {
    use super::{DateTime, Deserialize, Deserializer, NaiveDateTime, Serializer, Utc};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(raw.trim(), FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}

/// Booleans as written by every revision of the log: `true`/`false` from this
/// writer, `True`/`False` from the original one.
mod flexible_bool {
    use super::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "true" } else { "false" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "unrecognized completion flag: {other}"
            ))),
        }
    }
}

//
// ─── ATTEMPT LOG ──────────────────────────────────────────────────────────────
//

/// Append-only store of finished training attempts.
///
/// The design assumes a single trainee session per process; backends do not
/// lock against concurrent writers.
pub trait AttemptLog: Send + Sync {
    /// Append one record as the next row of the store, creating the store
    /// (including its header) if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the row cannot be written.
    fn append(&self, record: &AttemptRecord) -> Result<(), StorageError>;

    /// Read every record in the store, oldest first. Backends with legacy
    /// on-disk layouts upgrade them here before reading.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read at all; individual
    /// unreadable rows are skipped with a warning instead.
    fn read_all(&self) -> Result<Vec<AttemptRecord>, StorageError>;
}

/// Simple in-memory log for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryAttemptLog {
    records: Arc<Mutex<Vec<AttemptRecord>>>,
}

impl InMemoryAttemptLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttemptLog for InMemoryAttemptLog {
    fn append(&self, record: &AttemptRecord) -> Result<(), StorageError> {
        let mut guard = self.records.lock().map_err(|_| StorageError::Poisoned)?;
        guard.push(record.clone());
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<AttemptRecord>, StorageError> {
        let guard = self.records.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(guard.clone())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn build_record(score: u32) -> AttemptRecord {
        AttemptRecord {
            recorded_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            name: "Jane".into(),
            email: "jane@myfiducia.com".into(),
            score,
            fully_completed: true,
            duration: DurationSecs::Known(120.5),
        }
    }

    #[test]
    fn duration_parses_numbers_and_sentinels() {
        assert_eq!(DurationSecs::parse("120.5"), DurationSecs::Known(120.5));
        assert_eq!(DurationSecs::parse(" 0 "), DurationSecs::Known(0.0));
        assert_eq!(DurationSecs::parse("unknown"), DurationSecs::Unknown);
        assert_eq!(DurationSecs::parse(""), DurationSecs::Unknown);
        assert_eq!(DurationSecs::parse("-3"), DurationSecs::Unknown);
        assert_eq!(DurationSecs::parse("999999"), DurationSecs::Unknown);
    }

    #[test]
    fn in_memory_log_round_trips() {
        let log = InMemoryAttemptLog::new();
        log.append(&build_record(800)).unwrap();
        log.append(&build_record(500)).unwrap();

        let records = log.read_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].score, 800);
        assert_eq!(records[1].score, 500);
    }
}
