//! One-time, in-place column upgrade for logs written by earlier revisions.
//!
//! Older stores lack the `Email` and/or `DurationSeconds` columns. On read,
//! the whole file is rewritten once with the canonical column set, backfilling
//! sentinel values for pre-existing rows. A store that already carries every
//! canonical column is left untouched, so the upgrade is idempotent.

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs;
use std::path::Path;

use super::CANONICAL_HEADER;
use crate::repository::{DURATION_SENTINEL, EMAIL_SENTINEL, StorageError};

/// Upgrade `path` to the canonical column set if columns are missing.
///
/// Best-effort: a store that cannot be read or parsed is left as-is with a
/// warning, and the log is treated as append-only from that point.
pub(crate) fn upgrade_columns(path: &Path) {
    match try_upgrade(path) {
        Ok(backfilled) if backfilled > 0 => {
            log::info!("training log upgraded: {backfilled} column(s) backfilled");
        }
        Ok(_) => {}
        Err(err) => log::warn!("training log migration skipped: {err}"),
    }
}

fn try_upgrade(path: &Path) -> Result<usize, StorageError> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let header = reader.headers()?.clone();

    let missing = CANONICAL_HEADER
        .iter()
        .filter(|column| !header.iter().any(|h| h == **column))
        .count();
    if missing == 0 {
        return Ok(0);
    }

    let rows: Vec<StringRecord> = reader.records().collect::<Result<_, _>>()?;
    drop(reader);

    // Position of each canonical column in the legacy header, if present.
    let indices: Vec<Option<usize>> = CANONICAL_HEADER
        .iter()
        .map(|column| header.iter().position(|h| h == *column))
        .collect();

    // Rewrite into a sibling temp file, then swap it in atomically.
    let tmp_path = path.with_extension("csv.tmp");
    {
        let mut writer = WriterBuilder::new().from_path(&tmp_path)?;
        writer.write_record(CANONICAL_HEADER)?;
        for row in &rows {
            let upgraded: Vec<&str> = CANONICAL_HEADER
                .iter()
                .zip(&indices)
                .map(|(column, index)| match index {
                    Some(i) => row.get(*i).unwrap_or_else(|| sentinel_for(column)),
                    None => sentinel_for(column),
                })
                .collect();
            writer.write_record(upgraded)?;
        }
        writer.flush().map_err(StorageError::Io)?;
    }
    fs::rename(&tmp_path, path)?;

    Ok(missing)
}

fn sentinel_for(column: &str) -> &'static str {
    match column {
        "Email" => EMAIL_SENTINEL,
        "DurationSeconds" => DURATION_SENTINEL,
        _ => "",
    }
}
