//! Audit and repair of a single leaf record file.
//!
//! A file whose header is not the expected field list is recreated with only the header.
//! Otherwise rows failing a field predicate are dropped and the survivors are rewritten,
//! trimmed and re-indexed. A file without invalid rows is never rewritten.

use super::check_item;
use crate::error::StorageError;
use crate::items::reindex;
use crate::store::RecordStore;
use crate::types::Item;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};

/// A row dropped during repair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    pub line: u64,
    pub reason: String,
}

/// What auditing a record file did to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RepairOutcome {
    /// Header and rows valid; file left untouched.
    Clean { rows: usize },
    /// Header mismatch (or empty file); recreated with only the expected header.
    Reset { found_header: Vec<String> },
    /// Invalid rows dropped; remaining rows rewritten.
    Repaired {
        kept: usize,
        dropped: Vec<RejectedRow>,
    },
}

impl RepairOutcome {
    pub fn wrote_file(&self) -> bool {
        !matches!(self, RepairOutcome::Clean { .. })
    }
}

/// Validate the record file at `path` against `fields`, repairing it in place.
///
/// The file must exist; a missing file is reported as an I/O `NotFound` error since the
/// caller decides whether absence means "create".
pub fn audit_record_file(
    store: &dyn RecordStore,
    path: &Path,
    fields: &[String],
) -> Result<RepairOutcome, StorageError> {
    let sheet = store.read_sheet(path)?.ok_or_else(|| {
        StorageError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("record file {} does not exist", path.display()),
        ))
    })?;

    if sheet.header != fields {
        warn!(
            path = %path.display(),
            found = ?sheet.header,
            "Record file header does not match schema, recreating"
        );
        store.write_header(path, fields)?;
        return Ok(RepairOutcome::Reset {
            found_header: sheet.header,
        });
    }

    let mut kept: Vec<Item> = Vec::with_capacity(sheet.rows.len());
    let mut dropped = Vec::new();
    for (line, item) in sheet.rows {
        match check_item(&item) {
            None => kept.push(item.trimmed()),
            Some(reason) => {
                warn!(path = %path.display(), line, %reason, "Dropping invalid record");
                dropped.push(RejectedRow { line, reason });
            }
        }
    }

    if dropped.is_empty() {
        debug!(path = %path.display(), rows = kept.len(), "Record file is valid");
        return Ok(RepairOutcome::Clean { rows: kept.len() });
    }

    reindex(&mut kept);
    store.write(path, &kept, fields)?;
    Ok(RepairOutcome::Repaired {
        kept: kept.len(),
        dropped,
    })
}
