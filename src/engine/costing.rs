//! Cost ledger: itemized costs behind a single piece.

use crate::domain::{Pesos, Product};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The predefined cost lines every calculator session starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixedCost {
    Material,
    Gems,
    Labor,
    Packaging,
    Shipping,
}

impl FixedCost {
    pub const ALL: [FixedCost; 5] = [
        FixedCost::Material,
        FixedCost::Gems,
        FixedCost::Labor,
        FixedCost::Packaging,
        FixedCost::Shipping,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FixedCost::Material => "material",
            FixedCost::Gems => "gems",
            FixedCost::Labor => "labor",
            FixedCost::Packaging => "packaging",
            FixedCost::Shipping => "shipping",
        }
    }
}

/// One named cost line. Values are clamped at entry, never at sum time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostLineItem {
    pub id: Uuid,
    pub label: String,
    pub value: Pesos,
}

/// Calculator-session cost sheet: the five fixed lines plus an open-ended
/// user-added list. Never persisted.
#[derive(Debug, Clone)]
pub struct CostSheet {
    fixed: [Pesos; 5],
    custom: Vec<CostLineItem>,
}

impl CostSheet {
    /// An empty sheet: all fixed lines at zero, no custom lines.
    pub fn new() -> Self {
        CostSheet {
            fixed: [Pesos::ZERO; 5],
            custom: Vec::new(),
        }
    }

    /// Set a fixed line. Negative input is invalid and clamps to zero.
    pub fn set_fixed(&mut self, line: FixedCost, value: i64) {
        self.fixed[line as usize] = Pesos::clamped(value);
    }

    pub fn fixed(&self, line: FixedCost) -> Pesos {
        self.fixed[line as usize]
    }

    /// Add a custom line with a default label and zero value, returning
    /// its fresh id.
    pub fn add_custom(&mut self) -> Uuid {
        let id = Uuid::new_v4();
        self.custom.push(CostLineItem {
            id,
            label: "Other cost".to_string(),
            value: Pesos::ZERO,
        });
        id
    }

    /// Update a custom line by id; unknown ids are ignored.
    pub fn set_custom(&mut self, id: Uuid, label: impl Into<String>, value: i64) {
        if let Some(item) = self.custom.iter_mut().find(|item| item.id == id) {
            item.label = label.into();
            item.value = Pesos::clamped(value);
        }
    }

    /// Remove a custom line by id.
    pub fn remove_custom(&mut self, id: Uuid) {
        self.custom.retain(|item| item.id != id);
    }

    pub fn custom_items(&self) -> &[CostLineItem] {
        &self.custom
    }

    /// Total cost across fixed and custom lines.
    pub fn total_cost(&self) -> Pesos {
        let fixed: Pesos = self.fixed.iter().copied().sum();
        let custom: Pesos = self.custom.iter().map(|item| item.value).sum();
        fixed + custom
    }

    /// Seed the sheet from a real product: its unit cost lands on the
    /// material line, every other line resets to zero and custom lines
    /// are cleared. This is how the calculator connects back to inventory
    /// data for "what markup am I actually getting" analysis.
    pub fn seed_from_product(&mut self, product: &Product) {
        self.fixed = [Pesos::ZERO; 5];
        self.custom.clear();
        self.fixed[FixedCost::Material as usize] = product.unit_cost.unwrap_or(Pesos::ZERO);
    }
}

impl Default for CostSheet {
    fn default() -> Self {
        Self::new()
    }
}
