//! Inventory models and the low-stock policy

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stock item as stored in the inventory table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: Uuid,
    /// Free-form category: Perfume, Frasco, Etiqueta, Esencia, Insumo...
    pub item_type: String,
    pub name: String,
    pub quantity: Decimal,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Inventory item with its derived low-stock flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockLevel {
    #[serde(flatten)]
    pub item: InventoryItem,
    #[serde(flatten)]
    pub status: StockStatus,
}

impl From<InventoryItem> for StockLevel {
    fn from(item: InventoryItem) -> Self {
        let status = classify_stock(&item.item_type, &item.name, item.quantity);
        Self { item, status }
    }
}

/// Result of the low-stock policy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct StockStatus {
    pub low: bool,
    pub threshold: Option<Decimal>,
}

impl StockStatus {
    fn at_or_below(quantity: Decimal, threshold: i64) -> Self {
        let threshold = Decimal::from(threshold);
        Self {
            low: quantity <= threshold,
            threshold: Some(threshold),
        }
    }
}

/// Inventory categories the policy knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockCategory {
    Perfume,
    Bottle,
    Label,
    Essence,
    Supply,
    Other,
}

impl StockCategory {
    pub fn from_type(item_type: &str) -> Self {
        let t = item_type.trim();
        if t.eq_ignore_ascii_case("perfume") {
            StockCategory::Perfume
        } else if t.eq_ignore_ascii_case("frasco") {
            StockCategory::Bottle
        } else if t.eq_ignore_ascii_case("etiqueta") {
            StockCategory::Label
        } else if t.eq_ignore_ascii_case("esencia") {
            StockCategory::Essence
        } else if t.eq_ignore_ascii_case("insumo") {
            StockCategory::Supply
        } else {
            StockCategory::Other
        }
    }
}

/// Supplies tracked by name, with their thresholds
const NAMED_SUPPLY_THRESHOLDS: &[(&str, i64)] = &[("alcohol", 500), ("bolsas de madera", 10)];

/// Decide whether an inventory item is running low.
///
/// First match wins. Unknown categories and unlisted supplies are never low.
pub fn classify_stock(item_type: &str, name: &str, quantity: Decimal) -> StockStatus {
    match StockCategory::from_type(item_type) {
        StockCategory::Perfume => StockStatus::default(),
        StockCategory::Bottle | StockCategory::Label => StockStatus::at_or_below(quantity, 4),
        StockCategory::Essence => StockStatus::at_or_below(quantity, 15),
        StockCategory::Supply => {
            let name = name.trim().to_lowercase();
            NAMED_SUPPLY_THRESHOLDS
                .iter()
                .find(|(needle, _)| name.contains(needle))
                .map(|(_, threshold)| StockStatus::at_or_below(quantity, *threshold))
                .unwrap_or_default()
        }
        StockCategory::Other => StockStatus::default(),
    }
}
