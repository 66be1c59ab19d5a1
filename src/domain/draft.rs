//! Draft and patch types for form-driven saves.
//!
//! Forms accumulate input in a draft (create) or a patch (update); a
//! single `validate` pass produces a structured issue set before anything
//! reaches the persistence gateway. Negative stock and cost inputs are
//! clamped to zero at entry; a negative price is a validation issue.

use crate::config::Settings;
use crate::domain::{InternalAsset, Pesos, Product, ProductStatus, ProductVariant};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A single failed validation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    NameRequired,
    NameTooLong { max: usize },
    NegativePrice,
    ImageRequired,
    VariantNameRequired { index: usize },
}

impl ValidationIssue {
    fn message(&self) -> String {
        match self {
            ValidationIssue::NameRequired => "name is required".to_string(),
            ValidationIssue::NameTooLong { max } => {
                format!("name is longer than {} characters", max)
            }
            ValidationIssue::NegativePrice => "price must not be negative".to_string(),
            ValidationIssue::ImageRequired => "at least one image is required".to_string(),
            ValidationIssue::VariantNameRequired { index } => {
                format!("variant {} has no name", index + 1)
            }
        }
    }
}

/// The full set of issues found in one validation pass.
///
/// Resolved locally by form logic; never forwarded to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    fn from_issues(issues: Vec<ValidationIssue>) -> Result<(), ValidationError> {
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }

    pub fn contains(&self, issue: &ValidationIssue) -> bool {
        self.issues.contains(issue)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.issues.iter().map(ValidationIssue::message).collect();
        write!(f, "validation failed: {}", messages.join("; "))
    }
}

impl std::error::Error for ValidationError {}

fn check_name(name: &str, settings: &Settings, issues: &mut Vec<ValidationIssue>) {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        issues.push(ValidationIssue::NameRequired);
    } else if trimmed.chars().count() > settings.name_max_len {
        issues.push(ValidationIssue::NameTooLong {
            max: settings.name_max_len,
        });
    }
}

/// Form state for creating a sellable product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub images: Vec<String>,
    pub status: Option<ProductStatus>,
    pub category: String,
    pub collection: String,
    pub badge: Option<String>,
    pub stock: Option<i64>,
    pub unit_cost: Option<i64>,
    pub variants: Vec<VariantDraft>,
}

impl ProductDraft {
    pub fn named(name: impl Into<String>) -> Self {
        ProductDraft {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self, settings: &Settings) -> Result<(), ValidationError> {
        let mut issues = Vec::new();
        check_name(&self.name, settings, &mut issues);
        if self.price < 0 {
            issues.push(ValidationIssue::NegativePrice);
        }
        if self.images.is_empty() {
            issues.push(ValidationIssue::ImageRequired);
        }
        for (index, variant) in self.variants.iter().enumerate() {
            if variant.name.trim().is_empty() {
                issues.push(ValidationIssue::VariantNameRequired { index });
            }
        }
        ValidationError::from_issues(issues)
    }

    /// Validate and materialize a product with a fresh id.
    ///
    /// If several draft variants claim `is_primary`, only the first keeps
    /// it; the single-primary invariant holds from birth.
    pub fn build(self, settings: &Settings) -> Result<Product, ValidationError> {
        self.validate(settings)?;
        let mut primary_seen = false;
        let variants = self
            .variants
            .into_iter()
            .map(|draft| {
                let mut variant = draft.build();
                if variant.is_primary {
                    if primary_seen {
                        variant.is_primary = false;
                    }
                    primary_seen = true;
                }
                variant
            })
            .collect();

        Ok(Product {
            id: Uuid::new_v4(),
            name: self.name.trim().to_string(),
            description: self.description,
            price: Pesos::clamped(self.price),
            images: self.images,
            status: self.status.unwrap_or(ProductStatus::InStock),
            category: self.category,
            collection: self.collection,
            badge: self.badge,
            stock: self.stock.map(clamp_qty),
            unit_cost: self.unit_cost.map(Pesos::clamped),
            variants,
            created_at: chrono::Utc::now(),
        })
    }
}

/// Form state for one variant row inside a product form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantDraft {
    pub name: String,
    pub price: Option<i64>,
    pub stock: i64,
    pub unit_cost: i64,
    pub images: Vec<String>,
    pub location: String,
    pub is_primary: bool,
}

impl VariantDraft {
    pub fn named(name: impl Into<String>) -> Self {
        VariantDraft {
            name: name.into(),
            ..Default::default()
        }
    }

    fn build(self) -> ProductVariant {
        ProductVariant {
            id: Uuid::new_v4(),
            name: self.name.trim().to_string(),
            price: self.price.map(Pesos::clamped),
            stock: clamp_qty(self.stock),
            unit_cost: Pesos::clamped(self.unit_cost),
            images: self.images,
            location: self.location,
            is_primary: self.is_primary,
        }
    }
}

/// Partial update for an existing product; `None` leaves a field alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<i64>,
    /// Full replacement of the variant list when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<ProductVariant>>,
}

impl ProductPatch {
    pub fn validate(&self, settings: &Settings) -> Result<(), ValidationError> {
        let mut issues = Vec::new();
        if let Some(name) = &self.name {
            check_name(name, settings, &mut issues);
        }
        if let Some(price) = self.price {
            if price < 0 {
                issues.push(ValidationIssue::NegativePrice);
            }
        }
        if let Some(images) = &self.images {
            if images.is_empty() {
                issues.push(ValidationIssue::ImageRequired);
            }
        }
        ValidationError::from_issues(issues)
    }

    pub fn apply(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.trim().to_string();
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(price) = self.price {
            product.price = Pesos::clamped(price);
        }
        if let Some(images) = &self.images {
            product.images = images.clone();
        }
        if let Some(status) = self.status {
            product.status = status;
        }
        if let Some(category) = &self.category {
            product.category = category.clone();
        }
        if let Some(collection) = &self.collection {
            product.collection = collection.clone();
        }
        if let Some(badge) = &self.badge {
            product.badge = Some(badge.clone());
        }
        if let Some(stock) = self.stock {
            product.stock = Some(clamp_qty(stock));
        }
        if let Some(unit_cost) = self.unit_cost {
            product.unit_cost = Some(Pesos::clamped(unit_cost));
        }
        if let Some(variants) = &self.variants {
            product.variants = variants.clone();
        }
    }
}

/// Form state for creating an internal asset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetDraft {
    pub name: String,
    pub category: String,
    pub stock: i64,
    pub min_stock: i64,
    pub unit_cost: i64,
    pub location: String,
}

impl AssetDraft {
    pub fn named(name: impl Into<String>) -> Self {
        AssetDraft {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self, settings: &Settings) -> Result<(), ValidationError> {
        let mut issues = Vec::new();
        check_name(&self.name, settings, &mut issues);
        ValidationError::from_issues(issues)
    }

    pub fn build(self, settings: &Settings) -> Result<InternalAsset, ValidationError> {
        self.validate(settings)?;
        Ok(InternalAsset {
            id: Uuid::new_v4(),
            name: self.name.trim().to_string(),
            category: self.category,
            stock: clamp_qty(self.stock),
            min_stock: clamp_qty(self.min_stock),
            unit_cost: Pesos::clamped(self.unit_cost),
            location: self.location,
        })
    }
}

/// Partial update for an existing asset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl AssetPatch {
    pub fn relocation(location: impl Into<String>) -> Self {
        AssetPatch {
            location: Some(location.into()),
            ..Default::default()
        }
    }

    pub fn validate(&self, settings: &Settings) -> Result<(), ValidationError> {
        let mut issues = Vec::new();
        if let Some(name) = &self.name {
            check_name(name, settings, &mut issues);
        }
        ValidationError::from_issues(issues)
    }

    pub fn apply(&self, asset: &mut InternalAsset) {
        if let Some(name) = &self.name {
            asset.name = name.trim().to_string();
        }
        if let Some(category) = &self.category {
            asset.category = category.clone();
        }
        if let Some(stock) = self.stock {
            asset.stock = clamp_qty(stock);
        }
        if let Some(min_stock) = self.min_stock {
            asset.min_stock = clamp_qty(min_stock);
        }
        if let Some(unit_cost) = self.unit_cost {
            asset.unit_cost = Pesos::clamped(unit_cost);
        }
        if let Some(location) = &self.location {
            asset.location = location.clone();
        }
    }
}

fn clamp_qty(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}
