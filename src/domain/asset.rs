//! Internal supplies and consumables, tracked but never sold.

use crate::domain::Pesos;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A non-sellable supply item (boxes, cleaning cloths, loose findings).
///
/// Valued the same way a variant is (`stock x unit_cost`) but as an
/// independent stream from the sellable catalog, with its own reorder
/// threshold instead of the shared default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternalAsset {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub stock: u32,
    /// Reorder threshold for this asset.
    pub min_stock: u32,
    pub unit_cost: Pesos,
    pub location: String,
}

impl InternalAsset {
    pub fn new(name: impl Into<String>, category: impl Into<String>, stock: u32) -> Self {
        InternalAsset {
            id: Uuid::new_v4(),
            name: name.into(),
            category: category.into(),
            stock,
            min_stock: 0,
            unit_cost: Pesos::ZERO,
            location: String::new(),
        }
    }

    pub fn with_min_stock(mut self, min_stock: u32) -> Self {
        self.min_stock = min_stock;
        self
    }

    pub fn with_unit_cost(mut self, unit_cost: Pesos) -> Self {
        self.unit_cost = unit_cost;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Inventory value held in this asset.
    pub fn value(&self) -> Pesos {
        self.unit_cost.times_qty(self.stock)
    }
}
