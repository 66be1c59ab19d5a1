//! Inventory valuation and pricing-decision core for a small-business
//! jewelry catalog.
//!
//! This crate provides:
//! - A cost ledger and two-mode pricing calculator (markup / target)
//! - Variant stock/value aggregation with a single-primary invariant
//! - A pure catalog filter/sort engine with public-visibility rules
//! - A refresh coordinator that degrades gracefully when the external
//!   persistence gateway is slow or down
//!
//! Presentation, storage and transport live elsewhere; this is a library
//! of engines plus the orchestration that connects them to an opaque
//! [`gateway::PersistenceGateway`].

pub mod catalog;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod orchestration;
pub mod state;

pub use catalog::{Audience, CatalogQuery, Debouncer, SortOrder};
pub use config::{ConfigError, Settings};
pub use domain::{
    AssetDraft, AssetPatch, EntityKind, InternalAsset, Pesos, Product, ProductDraft,
    ProductPatch, ProductStatus, ProductVariant, ValidationError, VariantDraft,
};
pub use engine::{CalculatorSession, CostSheet, FixedCost, PricingMode, PricingResult};
pub use error::CoreError;
pub use gateway::{GatewayError, MockGateway, PersistenceGateway};
pub use orchestration::{BulkOutcome, CatalogService, Loudness, RefreshCoordinator};
pub use state::{ChangeFeed, Notification, NotificationReceiver, SharedState};
