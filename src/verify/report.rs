//! Outcome of a structure verification run.

use crate::validation::RejectedRow;
use serde::Serialize;
use std::path::PathBuf;

/// A record file recreated because its header did not match the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetFile {
    pub path: PathBuf,
    pub found_header: Vec<String>,
}

/// A record file rewritten without its invalid rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepairedFile {
    pub path: PathBuf,
    pub kept: usize,
    pub dropped: Vec<RejectedRow>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VerifyReport {
    pub base_path: PathBuf,
    /// The built-in seed hierarchy was used because the catalog was missing or empty.
    pub seeded: bool,
    /// Leaf categories described by the template applied in this run.
    pub expected_leaves: usize,
    pub created_dirs: Vec<PathBuf>,
    pub created_files: Vec<PathBuf>,
    pub reset_files: Vec<ResetFile>,
    pub repaired_files: Vec<RepairedFile>,
    pub audited_files: usize,
    pub errors: Vec<String>,
}

impl VerifyReport {
    pub fn new(base_path: PathBuf) -> Self {
        Self {
            base_path,
            ..Default::default()
        }
    }

    pub fn add_error(&mut self, error: String) {
        self.errors.push(error);
    }

    /// Number of filesystem mutations performed.
    pub fn change_count(&self) -> usize {
        self.created_dirs.len()
            + self.created_files.len()
            + self.reset_files.len()
            + self.repaired_files.len()
    }

    /// True when the run wrote nothing.
    pub fn is_noop(&self) -> bool {
        self.change_count() == 0
    }

    pub fn dropped_rows(&self) -> usize {
        self.repaired_files.iter().map(|f| f.dropped.len()).sum()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}
