//! Item command service: one entry point per item CLI command.
//!
//! Each method reads the whole leaf record file, applies one in-memory operation and,
//! when the operation changes data, writes the whole file back. The CLI resolves the
//! leaf, collects input, calls one method and formats the result.

use super::{
    add_item, delete_item, filter_by_name, find_item, modify_item, reindex, sort_items,
    Averages, ItemDraft, ItemPatch, SortKey, SortOrder,
};
use crate::error::ApiError;
use crate::store::RecordStore;
use crate::tree::Catalog;
use crate::types::Item;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct ItemCommandService;

/// Result of the add command.
#[derive(Debug, Clone)]
pub struct ItemAddResult {
    pub item: Item,
    pub path: PathBuf,
}

/// Result of the show command.
#[derive(Debug, Clone)]
pub struct ItemShowResult {
    pub items: Vec<Item>,
    /// Size of the record-set before filtering.
    pub total: usize,
}

/// Result of the modify command.
#[derive(Debug, Clone)]
pub struct ItemModifyResult {
    pub before: Item,
    pub after: Item,
}

/// Result of the delete command.
#[derive(Debug, Clone)]
pub struct ItemDeleteResult {
    pub removed: Item,
    pub remaining: usize,
}

/// Result of the sort command.
#[derive(Debug, Clone)]
pub struct ItemSortResult {
    pub items: Vec<Item>,
    pub saved: bool,
}

/// Result of the average command.
#[derive(Debug, Clone)]
pub struct ItemAverageResult {
    pub averages: Averages,
    pub files: usize,
}

impl ItemCommandService {
    /// Append a new item to the leaf at `path`.
    pub fn add(
        store: &dyn RecordStore,
        path: &Path,
        fields: &[String],
        draft: ItemDraft,
    ) -> Result<ItemAddResult, ApiError> {
        let mut items = store.read(path)?;
        let item = add_item(&mut items, draft)?;
        store.write(path, &items, fields)?;
        info!(path = %path.display(), id = %item.id, "Item added");
        Ok(ItemAddResult {
            item,
            path: path.to_path_buf(),
        })
    }

    /// List the items of a leaf, optionally keeping only names containing `filter`.
    pub fn show(
        store: &dyn RecordStore,
        path: &Path,
        filter: Option<&str>,
    ) -> Result<ItemShowResult, ApiError> {
        let items = store.read(path)?;
        let total = items.len();
        let items = match filter {
            Some(needle) => filter_by_name(&items, needle).into_iter().cloned().collect(),
            None => items,
        };
        Ok(ItemShowResult { items, total })
    }

    /// Fetch one item, e.g. to show current values before prompting for a patch.
    pub fn get(store: &dyn RecordStore, path: &Path, id: &str) -> Result<Item, ApiError> {
        let items = store.read(path)?;
        find_item(&items, id).cloned()
    }

    /// Overwrite the supplied fields of one item.
    pub fn modify(
        store: &dyn RecordStore,
        path: &Path,
        fields: &[String],
        id: &str,
        patch: &ItemPatch,
    ) -> Result<ItemModifyResult, ApiError> {
        let mut items = store.read(path)?;
        let before = find_item(&items, id)?.clone();
        let after = modify_item(&mut items, id, patch)?;
        if after != before {
            store.write(path, &items, fields)?;
            info!(path = %path.display(), id = %after.id, "Item modified");
        }
        Ok(ItemModifyResult { before, after })
    }

    /// Remove one item and re-index the rest.
    pub fn delete(
        store: &dyn RecordStore,
        path: &Path,
        fields: &[String],
        id: &str,
    ) -> Result<ItemDeleteResult, ApiError> {
        let mut items = store.read(path)?;
        let removed = delete_item(&mut items, id)?;
        store.write(path, &items, fields)?;
        info!(path = %path.display(), id = %removed.id, "Item deleted");
        Ok(ItemDeleteResult {
            removed,
            remaining: items.len(),
        })
    }

    /// Sort a leaf; with `save` the new order is written back re-indexed.
    pub fn sort(
        store: &dyn RecordStore,
        path: &Path,
        fields: &[String],
        key: SortKey,
        order: SortOrder,
        save: bool,
    ) -> Result<ItemSortResult, ApiError> {
        let mut items = store.read(path)?;
        sort_items(&mut items, key, order);
        if save {
            reindex(&mut items);
            store.write(path, &items, fields)?;
            info!(path = %path.display(), ?key, ?order, "Sorted order saved");
        }
        Ok(ItemSortResult { items, saved: save })
    }

    /// Mean price and stock over one leaf file.
    pub fn average_leaf(
        store: &dyn RecordStore,
        path: &Path,
    ) -> Result<ItemAverageResult, ApiError> {
        let items = store.read(path)?;
        Ok(ItemAverageResult {
            averages: items.iter().collect(),
            files: 1,
        })
    }

    /// Mean price and stock over every leaf in the catalog.
    pub fn average_catalog(catalog: &Catalog) -> ItemAverageResult {
        let leaves = catalog.leaves();
        let averages = leaves
            .iter()
            .flat_map(|leaf| leaf.records.items.iter())
            .collect();
        ItemAverageResult {
            averages,
            files: leaves.len(),
        }
    }
}
