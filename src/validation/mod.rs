//! Record Validator
//!
//! Field predicates for item rows and the repair policy applied to leaf record files.

pub mod repair;

use crate::types::Item;

pub use repair::{audit_record_file, RejectedRow, RepairOutcome};

/// True when trimming whitespace leaves at least one character.
pub fn is_valid_text(value: &str) -> bool {
    !value.trim().is_empty()
}

/// True when the value is an integer greater than or equal to zero.
pub fn is_valid_count(value: &str) -> bool {
    value.trim().parse::<i64>().map(|n| n >= 0).unwrap_or(false)
}

/// True when the value is an integer greater than zero.
pub fn is_valid_id(value: &str) -> bool {
    value.trim().parse::<u64>().map(|n| n > 0).unwrap_or(false)
}

/// Parse a price written as digits with an optional decimal separator.
///
/// A comma is read as the decimal point when the value has no dot, so "12,50" and
/// "12.50" both give 12.5. Signs, exponents, thousands separators and empty input
/// are rejected.
pub fn parse_price(value: &str) -> Option<f64> {
    let normalized = normalize_price(value)?;
    normalized.parse::<f64>().ok()
}

pub fn is_valid_price(value: &str) -> bool {
    parse_price(value).is_some()
}

/// Trimmed, point-separated form of a price, or `None` when it is malformed.
pub fn normalize_price(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let text = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replacen(',', ".", 1)
    } else {
        trimmed.to_string()
    };

    let mut digits = 0usize;
    let mut separators = 0usize;
    for ch in text.chars() {
        match ch {
            '0'..='9' => digits += 1,
            '.' => separators += 1,
            _ => return None,
        }
    }
    if digits == 0 || separators > 1 {
        return None;
    }
    Some(text)
}

/// Integer reading of a stock value, tolerating a fractional part ("4.0").
///
/// Used where stored data is summarised rather than validated, so a sloppy row
/// still contributes instead of being skipped.
pub fn parse_stock_lenient(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(n);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| f.trunc() as i64)
}

/// Reason a row fails validation, or `None` when every field passes.
pub fn check_item(item: &Item) -> Option<String> {
    if !is_valid_id(&item.id) {
        return Some(format!("invalid ID '{}'", item.id));
    }
    if !is_valid_text(&item.name) {
        return Some("empty Nombre".to_string());
    }
    if !is_valid_price(&item.price) {
        return Some(format!("invalid Precio '{}'", item.price));
    }
    if !is_valid_count(&item.stock) {
        return Some(format!("invalid Stock '{}'", item.stock));
    }
    None
}
