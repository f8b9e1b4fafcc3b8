//! MergeService: orchestrates sources, applies merge policy, deserializes to GondolaConfig.

use crate::config::sources::{environment, global_file, template, workspace_file};
use crate::config::xdg;
use crate::config::GondolaConfig;
use config::ConfigError;
use std::path::Path;

use super::policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from workspace and standard sources.
    /// Precedence: global file (lowest) -> workspace file -> environment (highest).
    /// A template table is taken whole from the last file that defines one.
    pub fn load(workspace_root: &Path) -> Result<GondolaConfig, ConfigError> {
        let builder = policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder)?;

        let mut config: GondolaConfig = builder.build()?.try_deserialize()?;
        let global = xdg::global_config_path();
        let workspace = workspace_file::path(workspace_root);
        let files = global.iter().map(|p| p.as_path()).chain([workspace.as_path()]);
        if let Some(found) = template::read_last_defined(files)? {
            config.catalog.template = Some(found);
        }
        Ok(config)
    }

    /// Load config from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<GondolaConfig, ConfigError> {
        use config::File;

        if !path.is_file() {
            return Err(ConfigError::Message(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        let builder = policy::builder_with_defaults()?;
        let builder = builder.add_source(File::from(path));
        let builder = environment::add_to_builder(builder)?;

        let mut config: GondolaConfig = builder.build()?.try_deserialize()?;
        if let Some(found) = template::read_from_file(path)? {
            config.catalog.template = Some(found);
        }
        Ok(config)
    }
}
