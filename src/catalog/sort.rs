//! Stable sort orders for catalog and back-office list views.

use crate::domain::Product;
use crate::engine::inventory::aggregate;
use serde::{Deserialize, Serialize};

/// Customer-facing sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
}

/// Sort in place; all orders are stable so ties keep their original
/// relative order.
pub fn apply(products: &mut [Product], order: SortOrder) {
    match order {
        SortOrder::Newest => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::PriceAsc => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOrder::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
    }
}

/// Back-office list sort; exactly one key is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackOfficeSort {
    NameAsc,
    NameDesc,
    StockAsc,
    StockDesc,
    Category,
    Collection,
    Status,
}

pub fn apply_back_office(products: &mut [Product], key: BackOfficeSort) {
    match key {
        BackOfficeSort::NameAsc => {
            products.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }
        BackOfficeSort::NameDesc => {
            products.sort_by(|a, b| b.name.to_lowercase().cmp(&a.name.to_lowercase()))
        }
        BackOfficeSort::StockAsc => {
            products.sort_by_key(|p| aggregate(p).stock);
        }
        BackOfficeSort::StockDesc => {
            products.sort_by(|a, b| aggregate(b).stock.cmp(&aggregate(a).stock))
        }
        BackOfficeSort::Category => products.sort_by(|a, b| a.category.cmp(&b.category)),
        BackOfficeSort::Collection => products.sort_by(|a, b| a.collection.cmp(&b.collection)),
        BackOfficeSort::Status => products.sort_by(|a, b| a.status.cmp(&b.status)),
    }
}
