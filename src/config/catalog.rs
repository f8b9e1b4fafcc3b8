//! CatalogConfig: where the catalog lives and what its files look like.

use crate::error::ApiError;
use crate::tree::{HierarchyTemplate, MixedCategoryPolicy};
use crate::types::{canonical_fields, CANONICAL_FIELDS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub fn default_base_path() -> PathBuf {
    PathBuf::from("Supermercado")
}

pub fn default_record_file() -> String {
    "productos.csv".to_string()
}

/// Catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog root directory (relative paths resolve against the workspace root)
    #[serde(default = "default_base_path")]
    pub base_path: PathBuf,

    /// Record file name inside each leaf directory, matched ignoring case
    #[serde(default = "default_record_file")]
    pub record_file: String,

    /// Header of every record file, in column order
    #[serde(default = "canonical_fields")]
    pub fields: Vec<String>,

    /// Handling of directories that hold both records and subcategories
    #[serde(default)]
    pub mixed_categories: MixedCategoryPolicy,

    /// Expected hierarchy; when absent a missing or empty catalog is seeded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<HierarchyTemplate>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            record_file: default_record_file(),
            fields: canonical_fields(),
            mixed_categories: MixedCategoryPolicy::default(),
            template: None,
        }
    }
}

impl CatalogConfig {
    /// Resolve the catalog root against the workspace root.
    pub fn resolve_base_path(&self, workspace_root: &Path) -> PathBuf {
        if self.base_path.is_absolute() {
            self.base_path.clone()
        } else {
            workspace_root.join(&self.base_path)
        }
    }

    /// Reject settings the catalog code cannot work with.
    pub fn validate(&self) -> Result<(), ApiError> {
        let record_file = self.record_file.trim();
        if record_file.is_empty() {
            return Err(ApiError::ConfigError(
                "catalog.record_file cannot be empty".to_string(),
            ));
        }
        if record_file.contains(['/', '\\']) {
            return Err(ApiError::ConfigError(format!(
                "catalog.record_file must be a file name, got '{}'",
                self.record_file
            )));
        }

        let mut sorted: Vec<&str> = self.fields.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        let mut expected = CANONICAL_FIELDS.to_vec();
        expected.sort_unstable();
        if sorted != expected {
            return Err(ApiError::ConfigError(format!(
                "catalog.fields must list exactly {} (any order), got {:?}",
                CANONICAL_FIELDS.join(", "),
                self.fields
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = CatalogConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.record_file, "productos.csv");
        assert_eq!(
            config.resolve_base_path(Path::new("/ws")),
            PathBuf::from("/ws/Supermercado")
        );
    }

    #[test]
    fn fields_must_be_a_permutation_of_the_schema() {
        let mut config = CatalogConfig::default();
        config.fields = vec!["Stock".into(), "Precio".into(), "Nombre".into(), "ID".into()];
        assert!(config.validate().is_ok());

        config.fields = vec!["ID".into(), "Nombre".into()];
        assert!(matches!(config.validate(), Err(ApiError::ConfigError(_))));

        config.fields = vec!["ID".into(), "ID".into(), "Precio".into(), "Stock".into()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn record_file_must_be_a_plain_name() {
        let mut config = CatalogConfig::default();
        config.record_file = "sub/productos.csv".to_string();
        assert!(config.validate().is_err());
        config.record_file = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
