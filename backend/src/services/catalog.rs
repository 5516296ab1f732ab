//! Catalogue service for supplies and essences

use rust_decimal::Decimal;
use shared::{Currency, Essence, Supply};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Catalogue service for the items that feed the margin calculator
#[derive(Clone)]
pub struct CatalogService {
    db: PgPool,
}

/// Row for supply queries
#[derive(Debug, FromRow)]
struct SupplyRow {
    id: Uuid,
    name: String,
    lot_price: Decimal,
    lot_quantity: Option<Decimal>,
    quantity_per_unit: Decimal,
    is_general: bool,
    supplier_id: Option<Uuid>,
    category: Option<String>,
}

impl From<SupplyRow> for Supply {
    fn from(row: SupplyRow) -> Self {
        Self {
            id: Some(row.id),
            name: row.name,
            lot_price: row.lot_price,
            lot_quantity: row.lot_quantity,
            quantity_per_unit: row.quantity_per_unit,
            is_general: row.is_general,
            supplier_id: row.supplier_id,
            category: row.category,
        }
    }
}

/// Row for essence queries
#[derive(Debug, FromRow)]
struct EssenceRow {
    id: Uuid,
    name: String,
    price: Decimal,
    currency: String,
    lot_grams: Decimal,
    supplier_id: Option<Uuid>,
}

impl TryFrom<EssenceRow> for Essence {
    type Error = AppError;

    fn try_from(row: EssenceRow) -> Result<Self, Self::Error> {
        let currency: Currency = row.currency.parse().map_err(|_| {
            AppError::CorruptRecord(format!(
                "essence {} has unknown currency '{}'",
                row.id, row.currency
            ))
        })?;
        Ok(Self {
            id: row.id,
            name: row.name,
            price: row.price,
            currency,
            lot_grams: row.lot_grams,
            supplier_id: row.supplier_id,
        })
    }
}

/// Convert rows, leaving out the ones that cannot be read
fn essences_from_rows(rows: Vec<EssenceRow>) -> Vec<Essence> {
    rows.into_iter()
        .filter_map(|row| match Essence::try_from(row) {
            Ok(essence) => Some(essence),
            Err(e) => {
                tracing::warn!(error = %e, "skipping essence");
                None
            }
        })
        .collect()
}

impl CatalogService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// All supplies, in catalogue order
    pub async fn list_supplies(&self) -> AppResult<Vec<Supply>> {
        let rows = sqlx::query_as::<_, SupplyRow>(
            r#"
            SELECT s.id, s.name, s.lot_price, s.lot_quantity, s.quantity_per_unit,
                   s.is_general, s.supplier_id, c.name AS category
            FROM supplies s
            LEFT JOIN categories c ON c.id = s.category_id
            ORDER BY s.name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Supply::from).collect())
    }

    /// Essences, optionally for one supplier
    pub async fn list_essences(&self, supplier_id: Option<Uuid>) -> AppResult<Vec<Essence>> {
        let rows = sqlx::query_as::<_, EssenceRow>(
            r#"
            SELECT id, name, price, currency, lot_grams, supplier_id
            FROM essences
            WHERE $1::uuid IS NULL OR supplier_id = $1
            ORDER BY name
            "#,
        )
        .bind(supplier_id)
        .fetch_all(&self.db)
        .await?;

        Ok(essences_from_rows(rows))
    }

    pub async fn get_essence(&self, id: Uuid) -> AppResult<Essence> {
        let row = sqlx::query_as::<_, EssenceRow>(
            r#"
            SELECT id, name, price, currency, lot_grams, supplier_id
            FROM essences
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Essence {}", id)))?;

        Essence::try_from(row)
    }
}
