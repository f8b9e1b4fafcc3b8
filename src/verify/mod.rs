//! Structure Verifier
//!
//! Brings the on-disk catalog in line with the expected hierarchy: missing category
//! directories and record files are created, and every record file is audited and
//! repaired through the record validator. Running it twice in a row writes nothing the
//! second time.

pub mod report;

use crate::error::ApiError;
use crate::store::{CsvRecordStore, RecordStore};
use crate::tree::{find_record_file, HierarchyTemplate, TemplateNode};
use crate::types::fold_name;
use crate::validation::{audit_record_file, RepairOutcome};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub use report::{RepairedFile, ResetFile, VerifyReport};

pub struct StructureVerifier<'s> {
    base_path: PathBuf,
    record_file: String,
    fields: Vec<String>,
    store: Option<&'s dyn RecordStore>,
}

/// Mutable state threaded through one verification run.
struct Run<'a> {
    store: &'a dyn RecordStore,
    report: VerifyReport,
    audited: HashSet<PathBuf>,
}

impl<'s> StructureVerifier<'s> {
    pub fn new(base_path: impl Into<PathBuf>, record_file: &str, fields: &[String]) -> Self {
        Self {
            base_path: base_path.into(),
            record_file: record_file.to_string(),
            fields: fields.to_vec(),
            store: None,
        }
    }

    pub fn with_store(mut self, store: &'s dyn RecordStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Ensure the hierarchy under the base path matches `template`.
    ///
    /// Without a template (or with an empty one) a missing or empty base directory is
    /// seeded with [`HierarchyTemplate::seed`]. Per-file failures are collected in the
    /// report; only failing to create the base directory is returned as an error.
    pub fn ensure(&self, template: Option<&HierarchyTemplate>) -> Result<VerifyReport, ApiError> {
        let default_store = CsvRecordStore::new();
        let store: &dyn RecordStore = match self.store {
            Some(store) => store,
            None => &default_store,
        };
        let mut run = Run {
            store,
            report: VerifyReport::new(self.base_path.clone()),
            audited: HashSet::new(),
        };

        let seed;
        let template = match template.filter(|t| !t.is_empty()) {
            Some(template) => Some(template),
            None if is_missing_or_empty(&self.base_path) => {
                info!(base = %self.base_path.display(), "Seeding default catalog hierarchy");
                run.report.seeded = true;
                seed = HierarchyTemplate::seed();
                Some(&seed)
            }
            None => None,
        };

        self.ensure_dir(&self.base_path, &mut run.report)?;
        if let Some(template) = template {
            run.report.expected_leaves = template.leaf_count();
            self.ensure_level(&self.base_path, &template.categories, &mut run);
        }
        self.audit_untracked(&mut run);

        let report = run.report;
        info!(
            base = %self.base_path.display(),
            changes = report.change_count(),
            audited = report.audited_files,
            errors = report.errors.len(),
            "Catalog structure verified"
        );
        Ok(report)
    }

    fn ensure_dir(&self, dir: &Path, report: &mut VerifyReport) -> Result<(), ApiError> {
        if dir.is_dir() {
            return Ok(());
        }
        std::fs::create_dir_all(dir)?;
        info!(dir = %dir.display(), "Created category directory");
        report.created_dirs.push(dir.to_path_buf());
        Ok(())
    }

    fn ensure_level(&self, parent: &Path, level: &BTreeMap<String, TemplateNode>, run: &mut Run) {
        for (name, content) in level {
            let dir = existing_child_dir(parent, name);
            if let Err(e) = self.ensure_dir(&dir, &mut run.report) {
                run.report
                    .add_error(format!("{}: failed to create directory: {}", dir.display(), e));
                continue;
            }
            match content {
                TemplateNode::Leaves(leaves) => {
                    for leaf in leaves {
                        let leaf_dir = existing_child_dir(&dir, leaf);
                        if let Err(e) = self.ensure_dir(&leaf_dir, &mut run.report) {
                            run.report.add_error(format!(
                                "{}: failed to create directory: {}",
                                leaf_dir.display(),
                                e
                            ));
                            continue;
                        }
                        self.ensure_record_file(&leaf_dir, run);
                    }
                }
                TemplateNode::Branch(next) => self.ensure_level(&dir, next, run),
            }
        }
    }

    fn ensure_record_file(&self, leaf_dir: &Path, run: &mut Run) {
        match find_record_file(leaf_dir, &self.record_file) {
            Ok(Some(path)) => self.audit(&path, run),
            Ok(None) => {
                let path = leaf_dir.join(&self.record_file);
                match run.store.write_header(&path, &self.fields) {
                    Ok(()) => {
                        info!(path = %path.display(), "Created record file");
                        run.audited.insert(path.clone());
                        run.report.created_files.push(path);
                    }
                    Err(e) => run
                        .report
                        .add_error(format!("{}: failed to create record file: {}", path.display(), e)),
                }
            }
            Err(e) => run
                .report
                .add_error(format!("{}: failed to scan directory: {}", leaf_dir.display(), e)),
        }
    }

    fn audit(&self, path: &Path, run: &mut Run) {
        if !run.audited.insert(path.to_path_buf()) {
            return;
        }
        run.report.audited_files += 1;
        match audit_record_file(run.store, path, &self.fields) {
            Ok(RepairOutcome::Clean { rows }) => {
                debug!(path = %path.display(), rows, "Record file ok");
            }
            Ok(RepairOutcome::Reset { found_header }) => {
                run.report.reset_files.push(ResetFile {
                    path: path.to_path_buf(),
                    found_header,
                });
            }
            Ok(RepairOutcome::Repaired { kept, dropped }) => {
                run.report.repaired_files.push(RepairedFile {
                    path: path.to_path_buf(),
                    kept,
                    dropped,
                });
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to audit record file");
                run.report.add_error(format!("{}: {}", path.display(), e));
            }
        }
    }

    /// Audit record files the template does not mention.
    fn audit_untracked(&self, run: &mut Run) {
        let wanted = fold_name(&self.record_file);
        for entry in WalkDir::new(&self.base_path)
            .min_depth(1)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    run.report.add_error(format!("directory walk failed: {}", e));
                    continue;
                }
            };
            let is_record = entry.file_type().is_file()
                && entry
                    .file_name()
                    .to_str()
                    .map(|name| fold_name(name) == wanted)
                    .unwrap_or(false);
            if is_record {
                self.audit(entry.path(), run);
            }
        }
    }
}

/// Directory `name` under `parent`, reusing an existing one whose name differs only in case.
fn existing_child_dir(parent: &Path, name: &str) -> PathBuf {
    let exact = parent.join(name);
    if exact.is_dir() || !parent.is_dir() {
        return exact;
    }
    let wanted = fold_name(name);
    WalkDir::new(parent)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .find(|entry| {
            entry.file_type().is_dir()
                && entry
                    .file_name()
                    .to_str()
                    .map(|found| fold_name(found) == wanted)
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .unwrap_or(exact)
}

fn is_missing_or_empty(dir: &Path) -> bool {
    if !dir.is_dir() {
        return true;
    }
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .next()
        .is_none()
}
