//! Catalog builder: walks the category directories and mirrors them in memory.

use super::node::{Catalog, CategoryNode, LeafRecords};
use crate::error::{ApiError, StorageError};
use crate::store::{CsvRecordStore, RecordStore};
use crate::types::{canonical_fields, fold_name};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// What to do with a directory holding both a record file and subdirectories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MixedCategoryPolicy {
    /// Treat the directory as a leaf; its subdirectories are left out of the tree.
    #[default]
    PreferRecords,
    /// Fail the build naming the directory.
    Reject,
}

/// Entries directly inside one directory, sorted by file name.
struct DirScan {
    subdirs: Vec<(String, PathBuf)>,
    record_file: Option<PathBuf>,
}

pub struct CatalogBuilder<'s> {
    base_path: PathBuf,
    record_file: String,
    fields: Vec<String>,
    mixed_policy: MixedCategoryPolicy,
    store: Option<&'s dyn RecordStore>,
}

impl<'s> CatalogBuilder<'s> {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            record_file: crate::config::default_record_file(),
            fields: canonical_fields(),
            mixed_policy: MixedCategoryPolicy::default(),
            store: None,
        }
    }

    pub fn with_record_file(mut self, record_file: impl Into<String>) -> Self {
        self.record_file = record_file.into();
        self
    }

    /// Expected header; leaves whose header differs are read best-effort and flagged.
    pub fn with_fields(mut self, fields: &[String]) -> Self {
        self.fields = fields.to_vec();
        self
    }

    pub fn with_mixed_policy(mut self, policy: MixedCategoryPolicy) -> Self {
        self.mixed_policy = policy;
        self
    }

    pub fn with_store(mut self, store: &'s dyn RecordStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the catalog. A missing base directory yields an empty catalog.
    pub fn build(&self) -> Result<Catalog, ApiError> {
        let default_store = CsvRecordStore::new();
        let store: &dyn RecordStore = match self.store {
            Some(store) => store,
            None => &default_store,
        };

        let mut catalog = Catalog {
            base_path: self.base_path.clone(),
            record_file: self.record_file.clone(),
            categories: BTreeMap::new(),
            warnings: Vec::new(),
        };
        if !self.base_path.is_dir() {
            debug!(base = %self.base_path.display(), "Catalog base does not exist");
            return Ok(catalog);
        }

        // Only directories count at the top level; stray files beside them are ignored.
        let top = self.scan_dir(&self.base_path)?;
        for (name, path) in top.subdirs {
            if let Some(node) = self.build_node(store, &path, &mut catalog.warnings)? {
                catalog.categories.insert(name, node);
            }
        }
        debug!(
            base = %self.base_path.display(),
            categories = catalog.categories.len(),
            "Catalog built"
        );
        Ok(catalog)
    }

    /// Node for `dir`, or `None` when the directory cannot be scanned.
    fn build_node(
        &self,
        store: &dyn RecordStore,
        dir: &Path,
        warnings: &mut Vec<String>,
    ) -> Result<Option<CategoryNode>, ApiError> {
        let scan = match self.scan_dir(dir) {
            Ok(scan) => scan,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Skipping unreadable category");
                warnings.push(format!("{}: skipped, {}", dir.display(), e));
                return Ok(None);
            }
        };

        if let Some(record_path) = scan.record_file {
            if !scan.subdirs.is_empty() {
                match self.mixed_policy {
                    MixedCategoryPolicy::Reject => {
                        return Err(ApiError::MixedCategory(dir.to_path_buf()))
                    }
                    MixedCategoryPolicy::PreferRecords => {
                        let skipped: Vec<&str> =
                            scan.subdirs.iter().map(|(n, _)| n.as_str()).collect();
                        warn!(
                            dir = %dir.display(),
                            ?skipped,
                            "Directory holds a record file and subdirectories; using the record file"
                        );
                        warnings.push(format!(
                            "{}: record file takes precedence over subdirectories {}",
                            dir.display(),
                            skipped.join(", ")
                        ));
                    }
                }
            }
            let items = match store.read_sheet(&record_path) {
                Ok(Some(sheet)) => {
                    if sheet.header != self.fields {
                        warn!(
                            path = %record_path.display(),
                            found = ?sheet.header,
                            "Record file header does not match schema"
                        );
                        warnings.push(format!(
                            "{}: header {} does not match schema",
                            record_path.display(),
                            sheet.header.join(",")
                        ));
                    }
                    sheet.into_items()
                }
                Ok(None) => Vec::new(),
                Err(e) => {
                    warn!(path = %record_path.display(), error = %e, "Failed to read record file");
                    warnings.push(format!("{}: {}", record_path.display(), e));
                    Vec::new()
                }
            };
            return Ok(Some(CategoryNode::Leaf(LeafRecords {
                path: record_path,
                items,
            })));
        }

        let mut children = BTreeMap::new();
        for (name, path) in scan.subdirs {
            if let Some(child) = self.build_node(store, &path, warnings)? {
                children.insert(name, child);
            }
        }
        Ok(Some(CategoryNode::Interior(children)))
    }

    fn scan_dir(&self, dir: &Path) -> Result<DirScan, ApiError> {
        let wanted = fold_name(&self.record_file);
        let mut scan = DirScan {
            subdirs: Vec::new(),
            record_file: None,
        };
        let entries = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();
        for entry in entries {
            let entry = entry.map_err(StorageError::from)?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                warn!(path = %entry.path().display(), "Skipping non UTF-8 entry");
                continue;
            };
            let file_type = entry.file_type();
            if file_type.is_dir() {
                scan.subdirs.push((name, entry.into_path()));
            } else if file_type.is_file()
                && scan.record_file.is_none()
                && fold_name(&name) == wanted
            {
                scan.record_file = Some(entry.into_path());
            }
        }
        Ok(scan)
    }
}

/// Find the record file directly inside `dir`, matching its name case-insensitively.
pub fn find_record_file(dir: &Path, record_file: &str) -> Result<Option<PathBuf>, StorageError> {
    let wanted = fold_name(record_file);
    if !dir.is_dir() {
        return Ok(None);
    }
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry
                .file_name()
                .to_str()
                .map(|name| fold_name(name) == wanted)
                .unwrap_or(false)
        {
            return Ok(Some(entry.into_path()));
        }
    }
    Ok(None)
}
