//! Pure computation engines: cost ledger, pricing calculator, inventory
//! aggregation. Synchronous functions of their inputs, safe to call
//! repeatedly, no hidden state.

pub mod costing;
pub mod inventory;
pub mod pricing;

pub use costing::{CostLineItem, CostSheet, FixedCost};
pub use inventory::{
    aggregate, apply_aggregate, asset_is_low, is_low, product_is_low, rollup_variants,
    set_primary, StockValue, ValuationSummary,
};
pub use pricing::{
    markup_presets, quote, rank_by_roi, CalculatorSession, PricingMode, PricingResult, RoiEntry,
};
