//! Inventory service for stock levels and low-stock flags

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::{InventoryItem, Pagination, StockLevel};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppResult;

/// Inventory service for reading stock
#[derive(Clone)]
pub struct InventoryService {
    db: PgPool,
}

/// Row for inventory queries
#[derive(Debug, FromRow)]
struct InventoryRow {
    id: Uuid,
    item_type: String,
    name: String,
    quantity: Decimal,
    updated_at: Option<DateTime<Utc>>,
}

impl From<InventoryRow> for InventoryItem {
    fn from(row: InventoryRow) -> Self {
        Self {
            id: row.id,
            item_type: row.item_type,
            name: row.name,
            quantity: row.quantity,
            updated_at: row.updated_at,
        }
    }
}

impl InventoryService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List stock with derived low-stock flags
    pub async fn list_stock(&self, page: &Pagination) -> AppResult<Vec<StockLevel>> {
        let rows = sqlx::query_as::<_, InventoryRow>(
            r#"
            SELECT id, item_type, name, quantity, updated_at
            FROM inventory
            ORDER BY item_type, name
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| StockLevel::from(InventoryItem::from(row)))
            .collect())
    }

    /// Items at or below their threshold.
    ///
    /// Thresholds depend on item names, so the filter runs here rather than
    /// in SQL.
    pub async fn list_low_stock(&self) -> AppResult<Vec<StockLevel>> {
        let rows = sqlx::query_as::<_, InventoryRow>(
            r#"
            SELECT id, item_type, name, quantity, updated_at
            FROM inventory
            ORDER BY item_type, name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let low = filter_low_stock(rows.into_iter().map(InventoryItem::from));
        tracing::debug!(count = low.len(), "low stock items");
        Ok(low)
    }
}

/// Keep only the items the low-stock policy flags
pub fn filter_low_stock(items: impl IntoIterator<Item = InventoryItem>) -> Vec<StockLevel> {
    items
        .into_iter()
        .map(StockLevel::from)
        .filter(|level| level.status.low)
        .collect()
}
