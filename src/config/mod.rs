//! Configuration
//!
//! Layered configuration for the catalog and logging: built-in defaults, the global
//! config file, the workspace `gondola.toml`, then `GONDOLA_*` environment variables.

pub mod catalog;
pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

pub use catalog::{default_base_path, default_record_file, CatalogConfig};
pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;

/// Workspace configuration file name.
pub const WORKSPACE_CONFIG_FILE: &str = "gondola.toml";

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "GONDOLA";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GondolaConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}
