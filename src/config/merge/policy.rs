//! Built-in defaults every config build starts from.

use crate::config::{default_base_path, default_record_file};
use crate::types::CANONICAL_FIELDS;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder seeded with the catalog defaults; later sources override key by key.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default(
            "catalog.base_path",
            default_base_path().to_string_lossy().into_owned(),
        )?
        .set_default("catalog.record_file", default_record_file())?
        .set_default("catalog.fields", CANONICAL_FIELDS.to_vec())?
        .set_default("catalog.mixed_categories", "prefer-records")
}
