//! Sellable product and its variants.

use crate::domain::Pesos;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Availability of a product in the public catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    InStock,
    MadeToOrder,
    SoldOut,
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductStatus::InStock => write!(f, "in_stock"),
            ProductStatus::MadeToOrder => write!(f, "made_to_order"),
            ProductStatus::SoldOut => write!(f, "sold_out"),
        }
    }
}

/// A sellable catalog entry.
///
/// When `variants` is non-empty, `stock` and `unit_cost` are display
/// caches: the authoritative figures are rolled up from the variant list
/// (see [`crate::engine::inventory::aggregate`]) and rewritten on every
/// save that touches variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Base price; a primary variant's price overrides it when present.
    pub price: Pesos,
    /// Ordered image URIs; index 0 is the cover.
    pub images: Vec<String>,
    pub status: ProductStatus,
    pub category: String,
    pub collection: String,
    /// Free-text merchandising tag ("nuevo", "oferta", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<Pesos>,
    pub variants: Vec<ProductVariant>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Create a product with a fresh id, stamped now.
    pub fn new(
        name: impl Into<String>,
        price: Pesos,
        category: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Product {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            price,
            images: Vec::new(),
            status: ProductStatus::InStock,
            category: category.into(),
            collection: collection.into(),
            badge: None,
            stock: None,
            unit_cost: None,
            variants: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    pub fn with_status(mut self, status: ProductStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_stock(mut self, stock: u32, unit_cost: Pesos) -> Self {
        self.stock = Some(stock);
        self.unit_cost = Some(unit_cost);
        self
    }

    pub fn with_variant(mut self, variant: ProductVariant) -> Self {
        self.variants.push(variant);
        self
    }

    /// The primary variant, if one is marked.
    pub fn primary_variant(&self) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| v.is_primary)
    }

    /// Price shown to the customer: the primary variant's override when
    /// present, the base price otherwise.
    pub fn effective_price(&self) -> Pesos {
        self.primary_variant()
            .and_then(|v| v.price)
            .unwrap_or(self.price)
    }

    /// The cover image (index 0), if any.
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// A sellable sub-option of a product (e.g. metal type), with its own
/// price, stock and cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: Uuid,
    pub name: String,
    /// Overrides the product price when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Pesos>,
    pub stock: u32,
    pub unit_cost: Pesos,
    /// Subset of the product's images that show this variant.
    pub images: Vec<String>,
    pub location: String,
    pub is_primary: bool,
}

impl ProductVariant {
    pub fn new(name: impl Into<String>, stock: u32, unit_cost: Pesos) -> Self {
        ProductVariant {
            id: Uuid::new_v4(),
            name: name.into(),
            price: None,
            stock,
            unit_cost,
            images: Vec::new(),
            location: String::new(),
            is_primary: false,
        }
    }

    pub fn with_price(mut self, price: Pesos) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Inventory value held in this variant.
    pub fn value(&self) -> Pesos {
        self.unit_cost.times_qty(self.stock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&ProductStatus::MadeToOrder).unwrap();
        assert_eq!(json, "\"made_to_order\"");
    }

    #[test]
    fn test_effective_price_prefers_primary_override() {
        let mut variant = ProductVariant::new("Oro 18k", 2, Pesos::new(30_000))
            .with_price(Pesos::new(95_000));
        variant.is_primary = true;

        let product = Product::new("Anillo Sol", Pesos::new(80_000), "anillos", "verano")
            .with_variant(variant);
        assert_eq!(product.effective_price(), Pesos::new(95_000));
    }

    #[test]
    fn test_effective_price_falls_back_to_base() {
        let mut variant = ProductVariant::new("Plata", 1, Pesos::new(12_000));
        variant.is_primary = true;

        let product = Product::new("Anillo Sol", Pesos::new(80_000), "anillos", "verano")
            .with_variant(variant);
        assert_eq!(product.effective_price(), Pesos::new(80_000));
    }

    #[test]
    fn test_variant_value() {
        let variant = ProductVariant::new("Oro", 3, Pesos::new(20_000));
        assert_eq!(variant.value(), Pesos::new(60_000));
    }

    #[test]
    fn test_cover_image() {
        let product = Product::new("Collar Luna", Pesos::new(50_000), "collares", "clasica")
            .with_images(vec!["a.webp".to_string(), "b.webp".to_string()]);
        assert_eq!(product.cover_image(), Some("a.webp"));
    }
}
