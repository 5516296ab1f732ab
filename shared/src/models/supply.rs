//! Supply and essence catalogue models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CalculationError;
use crate::types::Currency;

/// Category name that marks a supply as a bottle
pub const BOTTLE_CATEGORY: &str = "frasco";

/// A supply (insumo) bought in lots and consumed per unit produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supply {
    pub id: Option<Uuid>,
    pub name: String,
    /// Price paid for a whole lot, in pesos
    pub lot_price: Decimal,
    /// Units in a lot; required to be positive when costing
    pub lot_quantity: Option<Decimal>,
    /// Units consumed per finished product
    pub quantity_per_unit: Decimal,
    /// Shared by every product, as opposed to tied to one supplier's essences
    #[serde(default)]
    pub is_general: bool,
    pub supplier_id: Option<Uuid>,
    pub category: Option<String>,
}

impl Supply {
    /// Cost of this supply in one finished product
    pub fn unit_cost(&self) -> Result<Decimal, CalculationError> {
        match self.lot_quantity {
            Some(qty) if qty > Decimal::ZERO => self
                .lot_price
                .checked_div(qty)
                .and_then(|per_item| per_item.checked_mul(self.quantity_per_unit))
                .ok_or(CalculationError::Overflow("supplies")),
            _ => Err(CalculationError::InvalidLotQuantity {
                supply_id: self.id,
                name: self.name.clone(),
            }),
        }
    }

    pub fn is_bottle(&self) -> bool {
        self.category
            .as_deref()
            .is_some_and(|c| c.trim().eq_ignore_ascii_case(BOTTLE_CATEGORY))
    }
}

/// An essence offered by a supplier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Essence {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub currency: Currency,
    pub lot_grams: Decimal,
    pub supplier_id: Option<Uuid>,
}
