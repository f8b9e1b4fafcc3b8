//! Item Operations
//!
//! In-memory transformations of a leaf record-set: add, filter, modify, delete, sort and
//! averaging. Persistence is left to [`commands::ItemCommandService`], which wraps each
//! operation in a full read-modify-write cycle.

pub mod commands;

use crate::error::ApiError;
use crate::types::{fold_name, Item};
use crate::validation::{
    is_valid_count, is_valid_text, normalize_price, parse_price, parse_stock_lenient,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub use commands::ItemCommandService;

/// Assign IDs `1..N` in current order.
pub fn reindex(items: &mut [Item]) {
    for (idx, item) in items.iter_mut().enumerate() {
        item.id = (idx + 1).to_string();
    }
}

/// ID for a new item: one past the largest valid ID, or 1 for an empty set.
pub fn next_id(items: &[Item]) -> Result<u64, ApiError> {
    match items.iter().filter_map(Item::id_number).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or_else(|| {
            ApiError::InvalidInput(format!(
                "no free ID after {}; delete or sort the items to re-index them",
                max
            ))
        }),
    }
}

/// Fields for a new item, as typed by the operator.
#[derive(Debug, Clone, Default)]
pub struct ItemDraft {
    pub name: String,
    pub price: String,
    pub stock: String,
}

impl ItemDraft {
    /// Validate and normalize into the stored form.
    fn into_fields(self) -> Result<(String, String, String), ApiError> {
        if !is_valid_text(&self.name) {
            return Err(ApiError::InvalidInput("name cannot be empty".to_string()));
        }
        let price = normalize_price(&self.price).ok_or_else(|| {
            ApiError::InvalidInput(format!("invalid price '{}'", self.price.trim()))
        })?;
        if !is_valid_count(&self.stock) {
            return Err(ApiError::InvalidInput(format!(
                "invalid stock '{}' (must be an integer >= 0)",
                self.stock.trim()
            )));
        }
        Ok((
            self.name.trim().to_string(),
            price,
            self.stock.trim().to_string(),
        ))
    }
}

/// Append a validated item with the next free ID.
pub fn add_item(items: &mut Vec<Item>, draft: ItemDraft) -> Result<Item, ApiError> {
    let (name, price, stock) = draft.into_fields()?;
    let item = Item {
        id: next_id(items)?.to_string(),
        name,
        price,
        stock,
    };
    items.push(item.clone());
    Ok(item)
}

/// Items whose name contains `needle`, ignoring case.
pub fn filter_by_name<'a>(items: &'a [Item], needle: &str) -> Vec<&'a Item> {
    let needle = fold_name(needle.trim());
    items
        .iter()
        .filter(|item| fold_name(&item.name).contains(&needle))
        .collect()
}

/// Replacement values for an existing item. Blank or absent fields keep the current value.
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub price: Option<String>,
    pub stock: Option<String>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        [&self.name, &self.price, &self.stock]
            .iter()
            .all(|f| f.as_deref().map(str::trim).unwrap_or("").is_empty())
    }
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn position_of(items: &[Item], id: &str) -> Result<usize, ApiError> {
    let wanted = id.trim();
    items
        .iter()
        .position(|item| item.id.trim() == wanted)
        .ok_or_else(|| ApiError::ItemNotFound(wanted.to_string()))
}

/// Lookup by ID text.
pub fn find_item<'a>(items: &'a [Item], id: &str) -> Result<&'a Item, ApiError> {
    position_of(items, id).map(|idx| &items[idx])
}

/// Overwrite the supplied fields of the item with `id`.
///
/// Every supplied field is validated before anything changes, so a rejected patch leaves
/// the item as it was.
pub fn modify_item(items: &mut [Item], id: &str, patch: &ItemPatch) -> Result<Item, ApiError> {
    let idx = position_of(items, id)?;

    let name = supplied(&patch.name);
    let price = match supplied(&patch.price) {
        Some(raw) => Some(
            normalize_price(raw)
                .ok_or_else(|| ApiError::InvalidInput(format!("invalid price '{}'", raw)))?,
        ),
        None => None,
    };
    let stock = supplied(&patch.stock);
    if let Some(raw) = stock {
        if !is_valid_count(raw) {
            return Err(ApiError::InvalidInput(format!(
                "invalid stock '{}' (must be an integer >= 0)",
                raw
            )));
        }
    }

    let item = &mut items[idx];
    if let Some(name) = name {
        item.name = name.to_string();
    }
    if let Some(price) = price {
        item.price = price;
    }
    if let Some(stock) = stock {
        item.stock = stock.to_string();
    }
    Ok(item.clone())
}

/// Remove the item with `id` and re-index the remainder.
pub fn delete_item(items: &mut Vec<Item>, id: &str) -> Result<Item, ApiError> {
    let idx = position_of(items, id)?;
    let removed = items.remove(idx);
    reindex(items);
    Ok(removed)
}

/// Sort criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    Price,
    Stock,
    /// Price first, stock breaks ties.
    PriceThenStock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

fn price_key(item: &Item) -> f64 {
    parse_price(&item.price).unwrap_or(0.0)
}

fn stock_key(item: &Item) -> i64 {
    parse_stock_lenient(&item.stock).unwrap_or(0)
}

/// Stable sort; unparsable prices and stocks sort as zero.
pub fn sort_items(items: &mut [Item], key: SortKey, order: SortOrder) {
    let compare = |a: &Item, b: &Item| -> Ordering {
        let by_price = || price_key(a).total_cmp(&price_key(b));
        let by_stock = || stock_key(a).cmp(&stock_key(b));
        match key {
            SortKey::Price => by_price(),
            SortKey::Stock => by_stock(),
            SortKey::PriceThenStock => by_price().then_with(by_stock),
        }
    };
    match order {
        SortOrder::Ascending => items.sort_by(compare),
        SortOrder::Descending => items.sort_by(|a, b| compare(b, a)),
    }
}

/// Running totals for mean price and mean stock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Averages {
    pub price_total: f64,
    pub price_count: usize,
    pub stock_total: i64,
    pub stock_count: usize,
}

impl Averages {
    pub fn add(&mut self, item: &Item) {
        if let Some(price) = parse_price(&item.price) {
            self.price_total += price;
            self.price_count += 1;
        }
        if let Some(stock) = parse_stock_lenient(&item.stock) {
            self.stock_total += stock;
            self.stock_count += 1;
        }
    }

    pub fn mean_price(&self) -> Option<f64> {
        (self.price_count > 0).then(|| self.price_total / self.price_count as f64)
    }

    pub fn mean_stock(&self) -> Option<f64> {
        (self.stock_count > 0).then(|| self.stock_total as f64 / self.stock_count as f64)
    }

    pub fn is_empty(&self) -> bool {
        self.price_count == 0 && self.stock_count == 0
    }
}

impl<'a> FromIterator<&'a Item> for Averages {
    fn from_iter<I: IntoIterator<Item = &'a Item>>(iter: I) -> Self {
        let mut averages = Averages::default();
        for item in iter {
            averages.add(item);
        }
        averages
    }
}
