//! Domain types for the jewelry catalog core.
//!
//! This module provides:
//! - The Pesos money primitive (whole-peso integer amounts)
//! - Product, ProductVariant and InternalAsset records
//! - Draft/patch types with a single structured validation pass

pub mod asset;
pub mod draft;
pub mod primitives;
pub mod product;

pub use asset::InternalAsset;
pub use draft::{
    AssetDraft, AssetPatch, ProductDraft, ProductPatch, ValidationError, ValidationIssue,
    VariantDraft,
};
pub use primitives::{EntityKind, Pesos};
pub use product::{Product, ProductStatus, ProductVariant};
