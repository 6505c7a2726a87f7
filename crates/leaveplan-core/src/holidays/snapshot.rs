//! Holiday snapshots read from JSON files.
//!
//! The file holds a plain array of holiday records:
//!
//! ```json
//! [{ "date": "2024-11-20", "name": "Consciência Negra", "category": "national" }]
//! ```

use std::path::{Path, PathBuf};

use chrono::Datelike;

use super::HolidaySource;
use crate::calendar::HolidayRecord;
use crate::error::{CoreError, HolidaySourceError};

/// Read a JSON array of holiday records.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid record list.
pub fn load_json(path: impl AsRef<Path>) -> Result<Vec<HolidayRecord>, HolidaySourceError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| HolidaySourceError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Vec<HolidayRecord> =
        serde_json::from_str(&content).map_err(|source| HolidaySourceError::ParseFailed {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(path = %path.display(), count = records.len(), "loaded holiday snapshot");
    Ok(records)
}

/// A loaded snapshot usable as a [`HolidaySource`].
#[derive(Debug, Clone, Default)]
pub struct JsonSnapshot {
    path: Option<PathBuf>,
    records: Vec<HolidayRecord>,
}

impl JsonSnapshot {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HolidaySourceError> {
        let path = path.as_ref();
        Ok(Self {
            path: Some(path.to_path_buf()),
            records: load_json(path)?,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn records(&self) -> &[HolidayRecord] {
        &self.records
    }
}

impl From<Vec<HolidayRecord>> for JsonSnapshot {
    fn from(records: Vec<HolidayRecord>) -> Self {
        Self { path: None, records }
    }
}

impl HolidaySource for JsonSnapshot {
    fn holidays_for_year(&self, year: i32) -> Result<Vec<HolidayRecord>, CoreError> {
        Ok(self
            .records
            .iter()
            .filter(|h| h.date.year() == year)
            .cloned()
            .collect())
    }
}
