//! Hierarchy template read straight from the TOML config files.
//!
//! The `config` crate folds table keys to lowercase, which would rename template
//! categories. The `[catalog.template]` table is therefore parsed here with `toml` and
//! replaces whatever the layered builder produced for it.

use crate::tree::HierarchyTemplate;
use config::ConfigError;
use std::path::Path;

/// `[catalog.template]` of the file at `path`; `None` when the file or table is absent.
pub fn read_from_file(path: &Path) -> Result<Option<HierarchyTemplate>, ConfigError> {
    if !path.is_file() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Message(format!("{}: {}", path.display(), e)))?;
    let table: toml::Table = toml::from_str(&text)
        .map_err(|e| ConfigError::Message(format!("{}: {}", path.display(), e)))?;

    let Some(template) = table
        .get("catalog")
        .and_then(|catalog| catalog.get("template"))
    else {
        return Ok(None);
    };
    template
        .clone()
        .try_into::<HierarchyTemplate>()
        .map(Some)
        .map_err(|e| {
            ConfigError::Message(format!(
                "{}: invalid catalog.template: {}",
                path.display(),
                e
            ))
        })
}

/// Template from the highest-precedence file in `paths` that defines one.
pub fn read_last_defined<'p>(
    paths: impl IntoIterator<Item = &'p Path>,
) -> Result<Option<HierarchyTemplate>, ConfigError> {
    let mut found = None;
    for path in paths {
        if let Some(template) = read_from_file(path)? {
            found = Some(template);
        }
    }
    Ok(found)
}
