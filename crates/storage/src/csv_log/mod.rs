use csv::{ReaderBuilder, Trim, WriterBuilder};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

mod migrate;

use crate::repository::{AttemptLog, AttemptRecord, StorageError};

/// Canonical column set of the training log, in row order.
pub(crate) const CANONICAL_HEADER: [&str; 6] = [
    "Timestamp",
    "Username",
    "Email",
    "Score",
    "Completed",
    "DurationSeconds",
];

/// Append-only training log backed by a headered CSV file.
///
/// The file is created (header included) on first append. Logs written by
/// earlier revisions with fewer columns are upgraded in place the first time
/// they are read; see [`migrate`].
#[derive(Debug, Clone)]
pub struct CsvAttemptLog {
    path: PathBuf,
}

impl CsvAttemptLog {
    /// A log stored at `path`. The file itself is created lazily.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_empty_or_missing(&self) -> bool {
        fs::metadata(&self.path).map_or(true, |meta| meta.len() == 0)
    }
}

impl AttemptLog for CsvAttemptLog {
    fn append(&self, record: &AttemptRecord) -> Result<(), StorageError> {
        let needs_header = self.is_empty_or_missing();

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        if needs_header {
            writer.write_record(CANONICAL_HEADER)?;
        }
        writer.serialize(record)?;
        writer.flush().map_err(StorageError::Io)?;
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<AttemptRecord>, StorageError> {
        if self.is_empty_or_missing() {
            return Ok(Vec::new());
        }

        // Best-effort upgrade of legacy column sets; append stays correct
        // even when this is skipped.
        migrate::upgrade_columns(&self.path);

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_path(&self.path)?;

        let mut records = Vec::new();
        for row in reader.deserialize() {
            match row {
                Ok(record) => records.push(record),
                Err(err) => log::warn!("skipping unreadable training log row: {err}"),
            }
        }
        Ok(records)
    }
}
