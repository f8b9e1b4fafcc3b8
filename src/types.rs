//! Core types for the gondola catalog: the item record and its field schema.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

pub const FIELD_ID: &str = "ID";
pub const FIELD_NAME: &str = "Nombre";
pub const FIELD_PRICE: &str = "Precio";
pub const FIELD_STOCK: &str = "Stock";

/// Canonical header of every record file, in default column order.
pub const CANONICAL_FIELDS: [&str; 4] = [FIELD_ID, FIELD_NAME, FIELD_PRICE, FIELD_STOCK];

/// Canonical fields as owned strings (config default and test fixtures).
pub fn canonical_fields() -> Vec<String> {
    CANONICAL_FIELDS.iter().map(|f| f.to_string()).collect()
}

/// One inventory row, held as the text found on disk.
///
/// Rows are kept as text so a malformed file still reads back and the validator can
/// report the offending line instead of the read failing as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Nombre")]
    pub name: String,
    #[serde(rename = "Precio")]
    pub price: String,
    #[serde(rename = "Stock")]
    pub stock: String,
}

impl Item {
    pub fn new(id: u64, name: &str, price: &str, stock: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            price: price.to_string(),
            stock: stock.to_string(),
        }
    }

    /// Field value by header name; unknown names read as empty.
    pub fn field(&self, name: &str) -> &str {
        match name {
            FIELD_ID => &self.id,
            FIELD_NAME => &self.name,
            FIELD_PRICE => &self.price,
            FIELD_STOCK => &self.stock,
            _ => "",
        }
    }

    /// Set a field by header name. Returns false for names outside the schema.
    pub fn set_field(&mut self, name: &str, value: String) -> bool {
        match name {
            FIELD_ID => self.id = value,
            FIELD_NAME => self.name = value,
            FIELD_PRICE => self.price = value,
            FIELD_STOCK => self.stock = value,
            _ => return false,
        }
        true
    }

    /// Numeric ID when the stored text is a positive integer.
    pub fn id_number(&self) -> Option<u64> {
        self.id.trim().parse::<u64>().ok().filter(|id| *id > 0)
    }

    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            id: self.id.trim().to_string(),
            name: self.name.trim().to_string(),
            price: self.price.trim().to_string(),
            stock: self.stock.trim().to_string(),
        }
    }
}

/// Case- and normalization-insensitive key for comparing category and file names.
///
/// Composed and decomposed forms of accented names ("Lácteos") compare equal.
pub fn fold_name(name: &str) -> String {
    name.nfc().collect::<String>().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_access_follows_schema_names() {
        let mut item = Item::new(3, "Leche", "1.50", "10");
        assert_eq!(item.field("Nombre"), "Leche");
        assert_eq!(item.field("Color"), "");
        assert!(item.set_field("Stock", "12".to_string()));
        assert!(!item.set_field("Color", "red".to_string()));
        assert_eq!(item.stock, "12");
        assert_eq!(item.id_number(), Some(3));
    }

    #[test]
    fn fold_name_ignores_case_and_composition() {
        assert_eq!(fold_name("PRODUCTOS.csv"), fold_name("productos.CSV"));
        assert_eq!(fold_name("La\u{301}cteos"), fold_name("Lácteos"));
    }
}
