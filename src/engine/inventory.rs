//! Stock and value aggregation across a product's variants.

use crate::config::Settings;
use crate::domain::{InternalAsset, Pesos, Product};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Rolled-up stock and inventory value for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockValue {
    pub stock: u32,
    pub value: Pesos,
}

/// Authoritative stock and value for a product.
///
/// With variants, the rollup sums the variant list; the product's own
/// stock/unit_cost fields are display caches. Without variants, the
/// top-level fields are authoritative.
pub fn aggregate(product: &Product) -> StockValue {
    if product.variants.is_empty() {
        let stock = product.stock.unwrap_or(0);
        let value = product.unit_cost.unwrap_or(Pesos::ZERO).times_qty(stock);
        return StockValue { stock, value };
    }
    rollup_variants(&product.variants)
}

/// Sum stock and value over a variant list.
pub fn rollup_variants(variants: &[crate::domain::ProductVariant]) -> StockValue {
    let mut stock: u32 = 0;
    let mut value = Pesos::ZERO;
    for variant in variants {
        stock = stock.saturating_add(variant.stock);
        value = value + variant.value();
    }
    StockValue { stock, value }
}

/// Rewrite the display caches from the variant rollup.
///
/// Must run on every save that touches variants; the cached unit cost is
/// the average cost of the units on hand (zero when nothing is stocked).
/// Products without variants keep their own fields.
pub fn apply_aggregate(product: &mut Product) {
    if product.variants.is_empty() {
        return;
    }
    let rollup = aggregate(product);
    product.stock = Some(rollup.stock);
    product.unit_cost = Some(rollup.average_unit_cost());
}

impl StockValue {
    /// Average cost of the units on hand; zero when nothing is stocked.
    pub fn average_unit_cost(&self) -> Pesos {
        if self.stock == 0 {
            Pesos::ZERO
        } else {
            Pesos::new(self.value.as_i64() / i64::from(self.stock))
        }
    }
}

/// Mark exactly one variant primary, unsetting every other in the same
/// pass, and promote the new primary's first image to the product cover.
///
/// Returns false (and changes nothing) if the variant id is unknown.
/// Idempotent: repeating the call leaves the product unchanged.
pub fn set_primary(product: &mut Product, variant_id: Uuid) -> bool {
    if !product.variants.iter().any(|v| v.id == variant_id) {
        return false;
    }

    let mut cover: Option<String> = None;
    for variant in &mut product.variants {
        variant.is_primary = variant.id == variant_id;
        if variant.is_primary {
            cover = variant.images.first().cloned();
        }
    }
    if let Some(uri) = cover {
        promote_cover_image(&mut product.images, &uri);
    }
    true
}

/// Move `uri` to position 0, removing any prior occurrence first so the
/// list never holds duplicates.
pub fn promote_cover_image(images: &mut Vec<String>, uri: &str) {
    images.retain(|img| img != uri);
    images.insert(0, uri.to_string());
}

/// Shared low-stock predicate for variants, products and assets.
pub fn is_low(stock: u32, min: u32) -> bool {
    stock <= min
}

/// Product-level low-stock signal: the rolled-up stock against the
/// configured default threshold, uniformly for products with and without
/// variants.
pub fn product_is_low(product: &Product, settings: &Settings) -> bool {
    is_low(aggregate(product).stock, settings.low_stock_threshold)
}

/// Asset-level low-stock signal: each asset carries its own threshold.
pub fn asset_is_low(asset: &InternalAsset) -> bool {
    is_low(asset.stock, asset.min_stock)
}

/// Portfolio-level valuation roll-up for a list view header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValuationSummary {
    pub item_count: usize,
    pub total_stock: u64,
    pub total_value: Pesos,
    pub low_stock_count: usize,
}

pub fn summarize_products(products: &[Product], settings: &Settings) -> ValuationSummary {
    let mut summary = ValuationSummary {
        item_count: products.len(),
        ..Default::default()
    };
    for product in products {
        let rollup = aggregate(product);
        summary.total_stock += u64::from(rollup.stock);
        summary.total_value = summary.total_value + rollup.value;
        if product_is_low(product, settings) {
            summary.low_stock_count += 1;
        }
    }
    summary
}

pub fn summarize_assets(assets: &[InternalAsset]) -> ValuationSummary {
    let mut summary = ValuationSummary {
        item_count: assets.len(),
        ..Default::default()
    };
    for asset in assets {
        summary.total_stock += u64::from(asset.stock);
        summary.total_value = summary.total_value + asset.value();
        if asset_is_low(asset) {
            summary.low_stock_count += 1;
        }
    }
    summary
}
