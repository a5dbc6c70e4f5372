#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CSV loading for the V-League viewership dataset.
//!
//! The dataset is re-read from disk on every call; nothing is cached. Each
//! loader comes in two forms: a strict one returning [`DatasetError`] and
//! an `_or_empty` one that logs the problem and degrades to an empty
//! result, which is what the dashboard endpoints want. Malformed rows are
//! skipped individually and never fail the whole file.

pub mod clean;
mod raw;
pub mod table;

use std::path::Path;

use serde::de::DeserializeOwned;
use vleague_match_models::MatchRecord;

use crate::raw::RawMatchRow;

pub use clean::drop_missing;
pub use table::{read_table, read_table_or_empty};

/// File name of the match dataset inside the data directory.
pub const MATCHES_FILE: &str = "V-LEAGUE_2025_Stadium_Updated.csv";

/// Errors that can occur while loading a CSV file.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The file does not exist.
    #[error("Data file not found: {path}")]
    NotFound {
        /// Path that was looked up.
        path: String,
    },

    /// The file exists but could not be opened or read.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// Path to the CSV file.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The header row could not be parsed.
    #[error("CSV error in {path}: {source}")]
    Csv {
        /// Path to the CSV file.
        path: String,
        /// Underlying CSV error.
        source: csv::Error,
    },
}

impl DatasetError {
    /// Classifies a reader error, splitting I/O failures from CSV ones.
    pub(crate) fn from_csv(path: &Path, source: csv::Error) -> Self {
        let path = path.display().to_string();
        let io = match source.kind() {
            csv::ErrorKind::Io(e) => Some(std::io::Error::new(e.kind(), e.to_string())),
            _ => None,
        };
        match io {
            Some(source) => Self::Io { path, source },
            None => Self::Csv { path, source },
        }
    }

    /// Whether this error only means the file is absent.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Deserializes every well-formed row of the CSV file at `path` into `T`.
///
/// Rows that fail to deserialize are skipped.
///
/// # Errors
///
/// Returns [`DatasetError::NotFound`] if the file is missing,
/// [`DatasetError::Io`] if it cannot be opened or read, or
/// [`DatasetError::Csv`] if its header row is malformed.
pub fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DatasetError> {
    let mut reader = open_reader(path)?;

    let mut rows = Vec::new();
    let mut skipped = 0u64;
    for result in reader.deserialize::<T>() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                skipped += 1;
                log::trace!("  skipping malformed row: {e}");
            }
        }
    }

    log::debug!(
        "Read {} rows from {} ({skipped} skipped)",
        rows.len(),
        path.display()
    );

    Ok(rows)
}

/// Like [`read_rows`], but logs failures and returns no rows.
#[must_use]
pub fn read_rows_or_empty<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    read_rows(path).unwrap_or_else(|e| {
        log_degraded(&e);
        Vec::new()
    })
}

/// Loads all match records from the CSV file at `path`.
///
/// # Errors
///
/// Returns [`DatasetError`] if the file is missing or unreadable.
pub fn load_matches(path: &Path) -> Result<Vec<MatchRecord>, DatasetError> {
    let rows: Vec<RawMatchRow> = read_rows(path)?;
    Ok(rows.into_iter().map(RawMatchRow::into_record).collect())
}

/// Loads all match records, degrading to an empty list on any failure.
///
/// A missing file is logged as a warning, anything else as an error.
#[must_use]
pub fn load_matches_or_empty(path: &Path) -> Vec<MatchRecord> {
    load_matches(path).unwrap_or_else(|e| {
        log_degraded(&e);
        Vec::new()
    })
}

pub(crate) fn open_reader(path: &Path) -> Result<csv::Reader<std::fs::File>, DatasetError> {
    let file = std::fs::File::open(path).map_err(|source| {
        let path = path.display().to_string();
        if source.kind() == std::io::ErrorKind::NotFound {
            DatasetError::NotFound { path }
        } else {
            DatasetError::Io { path, source }
        }
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    reader
        .headers()
        .map_err(|e| DatasetError::from_csv(path, e))?;

    Ok(reader)
}

pub(crate) fn log_degraded(e: &DatasetError) {
    if e.is_not_found() {
        log::warn!("{e}");
    } else {
        log::error!("{e}");
    }
}
