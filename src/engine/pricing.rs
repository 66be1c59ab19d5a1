//! Two-mode pricing calculator and portfolio ROI ranking.
//!
//! Money stays integral ([`Pesos`]); ratio metrics stay [`Decimal`] so
//! repeated recomputation as inputs change never compounds rounding
//! error. Rounding to whole pesos happens only when a suggested price is
//! materialized. Division by zero is guarded, not raised: a zero divisor
//! always yields a zero metric.

use crate::domain::{Pesos, Product};
use crate::engine::costing::CostSheet;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Markup multipliers the UI offers as one-tap presets.
pub fn markup_presets() -> [Decimal; 6] {
    [
        Decimal::new(15, 1),
        Decimal::from(2),
        Decimal::new(25, 1),
        Decimal::from(3),
        Decimal::from(4),
        Decimal::from(5),
    ]
}

/// How the sale price is derived, selected explicitly by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "mode")]
pub enum PricingMode {
    /// Suggest a price as a multiple of total cost.
    Markup { multiplier: Decimal },
    /// Evaluate a price the user already has in mind.
    Target { price: Pesos },
}

/// Derived profitability read-out for one cost/price pair. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub total_cost: Pesos,
    /// Suggested price (markup mode) or the evaluated target price.
    pub price: Pesos,
    pub gross_profit: Pesos,
    pub margin_percent: Decimal,
    pub roi_percent: Decimal,
    /// How many multiples of cost the target price actually charges.
    /// Only meaningful in target mode; zero when the cost is zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implied_markup: Option<Decimal>,
}

/// Compute price and profitability for a total cost under the given mode.
pub fn quote(total_cost: Pesos, mode: PricingMode) -> PricingResult {
    let (price, implied_markup) = match mode {
        PricingMode::Markup { multiplier } => {
            let raw = total_cost.to_decimal() * multiplier;
            let rounded = raw.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
            (Pesos::new(rounded.to_i64().unwrap_or(i64::MAX)), None)
        }
        PricingMode::Target { price } => {
            let implied = if total_cost.is_zero() {
                Decimal::ZERO
            } else {
                price.to_decimal() / total_cost.to_decimal()
            };
            (price, Some(implied))
        }
    };

    let gross_profit = price - total_cost;
    let margin_percent = if price.is_zero() {
        Decimal::ZERO
    } else {
        gross_profit.to_decimal() / price.to_decimal() * Decimal::ONE_HUNDRED
    };
    let roi_percent = if total_cost.is_zero() {
        Decimal::ZERO
    } else {
        gross_profit.to_decimal() / total_cost.to_decimal() * Decimal::ONE_HUNDRED
    };

    PricingResult {
        total_cost,
        price,
        gross_profit,
        margin_percent,
        roi_percent,
        implied_markup,
    }
}

/// One calculator session: a cost sheet plus the selected pricing mode.
///
/// Exists only while the calculator is open; seeding from a product is
/// the single bridge back to real inventory data.
#[derive(Debug, Clone, Default)]
pub struct CalculatorSession {
    pub sheet: CostSheet,
    mode: Option<PricingMode>,
}

impl CalculatorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mode(&mut self, mode: PricingMode) {
        self.mode = Some(mode);
    }

    pub fn mode(&self) -> PricingMode {
        self.mode.unwrap_or(PricingMode::Markup {
            multiplier: Decimal::TWO,
        })
    }

    /// Load a product into the session: its unit cost seeds the material
    /// line, every other cost resets, and the mode switches to target at
    /// the product's current price.
    pub fn load_product(&mut self, product: &Product) {
        self.sheet.seed_from_product(product);
        self.mode = Some(PricingMode::Target {
            price: product.price,
        });
    }

    pub fn result(&self) -> PricingResult {
        quote(self.sheet.total_cost(), self.mode())
    }
}

/// One row of the portfolio ROI ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiEntry {
    pub product_id: Uuid,
    pub name: String,
    pub profit: Pesos,
    pub roi_percent: Decimal,
    pub margin_percent: Decimal,
}

/// Rank products by realized ROI, best first.
///
/// Products without a positive unit cost are excluded from the ranking
/// rather than scored as zero. Ties keep their original relative order.
pub fn rank_by_roi(products: &[Product]) -> Vec<RoiEntry> {
    let mut entries: Vec<RoiEntry> = products
        .iter()
        .filter_map(|product| {
            let unit_cost = product.unit_cost?;
            if unit_cost.as_i64() <= 0 {
                return None;
            }
            let profit = product.price - unit_cost;
            let roi_percent = profit.to_decimal() / unit_cost.to_decimal() * Decimal::ONE_HUNDRED;
            let margin_percent = if product.price.is_zero() {
                Decimal::ZERO
            } else {
                profit.to_decimal() / product.price.to_decimal() * Decimal::ONE_HUNDRED
            };
            Some(RoiEntry {
                product_id: product.id,
                name: product.name.clone(),
                profit,
                roi_percent,
                margin_percent,
            })
        })
        .collect();
    entries.sort_by(|a, b| b.roi_percent.cmp(&a.roi_percent));
    entries
}
