//! In-memory gateway for tests and offline development.

use super::{GatewayError, PersistenceGateway};
use crate::domain::{AssetPatch, InternalAsset, Product, ProductPatch, ProductStatus};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use uuid::Uuid;

/// Mock gateway holding its collections in memory.
///
/// Seed it builder-style, then hand it to the service/coordinator as an
/// `Arc<dyn PersistenceGateway>`. Failure and latency injection cover
/// the degraded-gateway paths without a network.
#[derive(Debug, Default)]
pub struct MockGateway {
    inner: Mutex<Inner>,
    latency: Option<Duration>,
}

#[derive(Debug, Default)]
struct Inner {
    products: Vec<Product>,
    assets: Vec<InternalAsset>,
    read_failure: Option<GatewayError>,
    write_failure: Option<GatewayError>,
    product_list_calls: usize,
    asset_list_calls: usize,
    write_calls: usize,
}

impl MockGateway {
    /// Create a mock gateway with empty collections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a product.
    pub fn with_product(self, product: Product) -> Self {
        self.lock().products.push(product);
        self
    }

    /// Seed several products.
    pub fn with_products(self, products: Vec<Product>) -> Self {
        self.lock().products.extend(products);
        self
    }

    /// Seed an asset.
    pub fn with_asset(self, asset: InternalAsset) -> Self {
        self.lock().assets.push(asset);
        self
    }

    /// Every call sleeps this long before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Every read fails with this error.
    pub fn with_read_failure(self, error: GatewayError) -> Self {
        self.lock().read_failure = Some(error);
        self
    }

    /// Every write fails with this error.
    pub fn with_write_failure(self, error: GatewayError) -> Self {
        self.lock().write_failure = Some(error);
        self
    }

    /// Stop failing reads (for recovery scenarios).
    pub fn clear_read_failure(&self) {
        self.lock().read_failure = None;
    }

    /// Number of `list_products` calls served so far.
    pub fn product_list_calls(&self) -> usize {
        self.lock().product_list_calls
    }

    /// Number of write calls served so far (including failed ones).
    pub fn write_calls(&self) -> usize {
        self.lock().write_calls
    }

    /// Snapshot of the stored products.
    pub fn products(&self) -> Vec<Product> {
        self.lock().products.clone()
    }

    /// Snapshot of the stored assets.
    pub fn assets(&self) -> Vec<InternalAsset> {
        self.lock().assets.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl PersistenceGateway for MockGateway {
    async fn list_products(&self) -> Result<Vec<Product>, GatewayError> {
        self.simulate_latency().await;
        let mut inner = self.lock();
        inner.product_list_calls += 1;
        if let Some(error) = &inner.read_failure {
            return Err(error.clone());
        }
        Ok(inner.products.clone())
    }

    async fn list_assets(&self) -> Result<Vec<InternalAsset>, GatewayError> {
        self.simulate_latency().await;
        let mut inner = self.lock();
        inner.asset_list_calls += 1;
        if let Some(error) = &inner.read_failure {
            return Err(error.clone());
        }
        Ok(inner.assets.clone())
    }

    async fn create_product(&self, product: Product) -> Result<Product, GatewayError> {
        self.simulate_latency().await;
        let mut inner = self.lock();
        inner.write_calls += 1;
        if let Some(error) = &inner.write_failure {
            return Err(error.clone());
        }
        inner.products.push(product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        id: Uuid,
        patch: ProductPatch,
    ) -> Result<Product, GatewayError> {
        self.simulate_latency().await;
        let mut inner = self.lock();
        inner.write_calls += 1;
        if let Some(error) = &inner.write_failure {
            return Err(error.clone());
        }
        let product = inner
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(GatewayError::NotFound(id))?;
        patch.apply(product);
        Ok(product.clone())
    }

    async fn delete_products(&self, ids: &[Uuid]) -> Result<(), GatewayError> {
        self.simulate_latency().await;
        let mut inner = self.lock();
        inner.write_calls += 1;
        if let Some(error) = &inner.write_failure {
            return Err(error.clone());
        }
        inner.products.retain(|p| !ids.contains(&p.id));
        Ok(())
    }

    async fn update_status_bulk(
        &self,
        ids: &[Uuid],
        status: ProductStatus,
    ) -> Result<(), GatewayError> {
        self.simulate_latency().await;
        let mut inner = self.lock();
        inner.write_calls += 1;
        if let Some(error) = &inner.write_failure {
            return Err(error.clone());
        }
        for product in inner.products.iter_mut().filter(|p| ids.contains(&p.id)) {
            product.status = status;
        }
        Ok(())
    }

    async fn create_asset(&self, asset: InternalAsset) -> Result<InternalAsset, GatewayError> {
        self.simulate_latency().await;
        let mut inner = self.lock();
        inner.write_calls += 1;
        if let Some(error) = &inner.write_failure {
            return Err(error.clone());
        }
        inner.assets.push(asset.clone());
        Ok(asset)
    }

    async fn update_asset(
        &self,
        id: Uuid,
        patch: AssetPatch,
    ) -> Result<InternalAsset, GatewayError> {
        self.simulate_latency().await;
        let mut inner = self.lock();
        inner.write_calls += 1;
        if let Some(error) = &inner.write_failure {
            return Err(error.clone());
        }
        let asset = inner
            .assets
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(GatewayError::NotFound(id))?;
        patch.apply(asset);
        Ok(asset.clone())
    }

    async fn delete_assets(&self, ids: &[Uuid]) -> Result<(), GatewayError> {
        self.simulate_latency().await;
        let mut inner = self.lock();
        inner.write_calls += 1;
        if let Some(error) = &inner.write_failure {
            return Err(error.clone());
        }
        inner.assets.retain(|a| !ids.contains(&a.id));
        Ok(())
    }
}
