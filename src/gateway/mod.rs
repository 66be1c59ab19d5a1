//! Persistence gateway abstraction over the external hosted data service.

use crate::domain::{AssetPatch, InternalAsset, Product, ProductPatch, ProductStatus};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

pub mod mock;

pub use mock::MockGateway;

/// Contract the core consumes for reads and writes. Implementation is
/// opaque beyond this interface; the gateway is the source of truth and
/// the last write wins.
#[async_trait]
pub trait PersistenceGateway: Send + Sync + fmt::Debug {
    /// Fetch the full product collection.
    async fn list_products(&self) -> Result<Vec<Product>, GatewayError>;

    /// Fetch the full internal-asset collection.
    async fn list_assets(&self) -> Result<Vec<InternalAsset>, GatewayError>;

    /// Persist a new product, returning the stored record.
    async fn create_product(&self, product: Product) -> Result<Product, GatewayError>;

    /// Apply a partial update, returning the stored record.
    async fn update_product(&self, id: Uuid, patch: ProductPatch)
        -> Result<Product, GatewayError>;

    /// Delete products as one batch.
    async fn delete_products(&self, ids: &[Uuid]) -> Result<(), GatewayError>;

    /// Set the status of several products as one batch.
    async fn update_status_bulk(
        &self,
        ids: &[Uuid],
        status: ProductStatus,
    ) -> Result<(), GatewayError>;

    /// Persist a new asset, returning the stored record.
    async fn create_asset(&self, asset: InternalAsset) -> Result<InternalAsset, GatewayError>;

    /// Apply a partial update to an asset, returning the stored record.
    async fn update_asset(&self, id: Uuid, patch: AssetPatch)
        -> Result<InternalAsset, GatewayError>;

    /// Delete assets as one batch.
    async fn delete_assets(&self, ids: &[Uuid]) -> Result<(), GatewayError>;
}

/// Error type for gateway operations.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The service could not be reached or answered with a server fault.
    #[error("gateway unavailable: {0}")]
    Unavailable(String),
    /// The service refused the write.
    #[error("gateway rejected the write: {0}")]
    Rejected(String),
    /// No record with the given id.
    #[error("record not found: {0}")]
    NotFound(Uuid),
    /// The guarded fetch timer fired before the call finished.
    #[error("gateway call timed out")]
    TimedOut,
}
