//! Record Store
//!
//! Reads and writes the record-set of a single leaf category. Each leaf is backed by one
//! flat tabular file that is always read whole and rewritten whole.

pub mod persistence;

use crate::error::StorageError;
use crate::types::Item;
use std::path::Path;

pub use persistence::CsvRecordStore;

/// A record file as found on disk: header row plus data rows tagged with their line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSheet {
    pub header: Vec<String>,
    /// (1-based line number in the file, row)
    pub rows: Vec<(u64, Item)>,
}

impl RecordSheet {
    pub fn into_items(self) -> Vec<Item> {
        self.rows.into_iter().map(|(_, item)| item).collect()
    }
}

/// Record Store interface
pub trait RecordStore {
    /// Parse a record file. `Ok(None)` when the file does not exist.
    fn read_sheet(&self, path: &Path) -> Result<Option<RecordSheet>, StorageError>;

    /// Overwrite `path` with a header row and one row per item, columns in `fields` order.
    fn write(&self, path: &Path, items: &[Item], fields: &[String]) -> Result<(), StorageError>;

    /// Items of a record file; a missing file reads as an empty record-set.
    fn read(&self, path: &Path) -> Result<Vec<Item>, StorageError> {
        Ok(self
            .read_sheet(path)?
            .map(RecordSheet::into_items)
            .unwrap_or_default())
    }

    /// Header row as written on disk; `None` when the file does not exist.
    fn read_header(&self, path: &Path) -> Result<Option<Vec<String>>, StorageError> {
        Ok(self.read_sheet(path)?.map(|sheet| sheet.header))
    }

    /// Create or truncate `path` so it holds only the header row.
    fn write_header(&self, path: &Path, fields: &[String]) -> Result<(), StorageError> {
        self.write(path, &[], fields)
    }
}
