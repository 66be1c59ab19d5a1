//! Validated write path between forms and the persistence gateway.

use crate::config::Settings;
use crate::domain::{
    AssetDraft, AssetPatch, InternalAsset, Product, ProductDraft, ProductPatch, ProductStatus,
};
use crate::engine::inventory::{apply_aggregate, rollup_variants, set_primary};
use crate::error::CoreError;
use crate::gateway::{GatewayError, PersistenceGateway};
use crate::state::{BulkAction, Notification, NotificationSender, SharedState};
use std::sync::Arc;
use uuid::Uuid;

/// Outcome of one bulk operation; reported as a single summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkOutcome {
    pub action: BulkAction,
    pub done: usize,
    pub failed: usize,
}

impl BulkOutcome {
    pub fn is_partial(&self) -> bool {
        self.done > 0 && self.failed > 0
    }
}

/// Form-facing entry point for every write.
///
/// Validation runs before anything reaches the gateway; a failed write
/// surfaces once and leaves the local snapshot untouched. There is no
/// version check: concurrent edits from two sessions silently
/// last-write-win at the gateway, and the next refresh converges.
#[derive(Clone)]
pub struct CatalogService {
    gateway: Arc<dyn PersistenceGateway>,
    state: SharedState,
    notices: NotificationSender,
    settings: Settings,
}

impl CatalogService {
    pub fn new(
        gateway: Arc<dyn PersistenceGateway>,
        state: SharedState,
        notices: NotificationSender,
        settings: Settings,
    ) -> Self {
        Self {
            gateway,
            state,
            notices,
            settings,
        }
    }

    /// Validate and persist a new product.
    pub async fn create_product(&self, draft: ProductDraft) -> Result<Product, CoreError> {
        let mut product = draft.build(&self.settings)?;
        apply_aggregate(&mut product);

        match self.gateway.create_product(product).await {
            Ok(stored) => {
                self.state.write().await.upsert_product(stored.clone());
                Ok(stored)
            }
            Err(error) => Err(self.surface_write_failure(error)),
        }
    }

    /// Validate and persist a partial update. A patch that replaces the
    /// variant list also rewrites the stock/unit-cost display caches so
    /// they never go stale.
    pub async fn update_product(
        &self,
        id: Uuid,
        mut patch: ProductPatch,
    ) -> Result<Product, CoreError> {
        patch.validate(&self.settings)?;
        sync_variant_caches(&mut patch);

        match self.gateway.update_product(id, patch).await {
            Ok(stored) => {
                self.state.write().await.upsert_product(stored.clone());
                Ok(stored)
            }
            Err(error) => Err(self.surface_write_failure(error)),
        }
    }

    /// Make one variant the primary in a single atomic transition and
    /// persist the result (variant flags, cover image, display caches).
    pub async fn set_primary_variant(
        &self,
        product_id: Uuid,
        variant_id: Uuid,
    ) -> Result<Product, CoreError> {
        let mut product = {
            let state = self.state.read().await;
            state
                .products()
                .iter()
                .find(|p| p.id == product_id)
                .cloned()
                .ok_or(GatewayError::NotFound(product_id))?
        };
        if !set_primary(&mut product, variant_id) {
            return Err(GatewayError::NotFound(variant_id).into());
        }

        let patch = ProductPatch {
            images: Some(product.images.clone()),
            variants: Some(product.variants.clone()),
            ..Default::default()
        };
        self.update_product(product_id, patch).await
    }

    /// Delete products as one batch; emits a single summary notification.
    pub async fn delete_products(&self, ids: &[Uuid]) -> BulkOutcome {
        let outcome = match self.gateway.delete_products(ids).await {
            Ok(()) => {
                self.state.write().await.remove_products(ids);
                BulkOutcome {
                    action: BulkAction::Delete,
                    done: ids.len(),
                    failed: 0,
                }
            }
            Err(error) => {
                tracing::warn!(%error, count = ids.len(), "bulk delete failed");
                BulkOutcome {
                    action: BulkAction::Delete,
                    done: 0,
                    failed: ids.len(),
                }
            }
        };
        self.report_bulk(outcome);
        outcome
    }

    /// Set the status of several products as one batch.
    pub async fn set_status_bulk(&self, ids: &[Uuid], status: ProductStatus) -> BulkOutcome {
        let outcome = match self.gateway.update_status_bulk(ids, status).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                let updated: Vec<Product> = state
                    .products()
                    .iter()
                    .filter(|p| ids.contains(&p.id))
                    .cloned()
                    .map(|mut p| {
                        p.status = status;
                        p
                    })
                    .collect();
                for product in updated {
                    state.upsert_product(product);
                }
                BulkOutcome {
                    action: BulkAction::StatusChange,
                    done: ids.len(),
                    failed: 0,
                }
            }
            Err(error) => {
                tracing::warn!(%error, count = ids.len(), "bulk status change failed");
                BulkOutcome {
                    action: BulkAction::StatusChange,
                    done: 0,
                    failed: ids.len(),
                }
            }
        };
        self.report_bulk(outcome);
        outcome
    }

    /// Move several assets to a new location, one write per asset.
    ///
    /// Not transactional: a mid-batch failure leaves earlier items moved,
    /// and the summary says so rather than rolling back.
    pub async fn relocate_assets(&self, ids: &[Uuid], location: &str) -> BulkOutcome {
        let mut done = 0;
        let mut failed = 0;
        for id in ids {
            match self
                .gateway
                .update_asset(*id, AssetPatch::relocation(location))
                .await
            {
                Ok(stored) => {
                    self.state.write().await.upsert_asset(stored);
                    done += 1;
                }
                Err(error) => {
                    tracing::warn!(%error, asset = %id, "relocate failed");
                    failed += 1;
                }
            }
        }
        let outcome = BulkOutcome {
            action: BulkAction::Relocate,
            done,
            failed,
        };
        self.report_bulk(outcome);
        outcome
    }

    /// Validate and persist a new asset.
    pub async fn create_asset(&self, draft: AssetDraft) -> Result<InternalAsset, CoreError> {
        let asset = draft.build(&self.settings)?;
        match self.gateway.create_asset(asset).await {
            Ok(stored) => {
                self.state.write().await.upsert_asset(stored.clone());
                Ok(stored)
            }
            Err(error) => Err(self.surface_write_failure(error)),
        }
    }

    /// Validate and persist a partial asset update.
    pub async fn update_asset(
        &self,
        id: Uuid,
        patch: AssetPatch,
    ) -> Result<InternalAsset, CoreError> {
        patch.validate(&self.settings)?;
        match self.gateway.update_asset(id, patch).await {
            Ok(stored) => {
                self.state.write().await.upsert_asset(stored.clone());
                Ok(stored)
            }
            Err(error) => Err(self.surface_write_failure(error)),
        }
    }

    /// Delete assets as one batch.
    pub async fn delete_assets(&self, ids: &[Uuid]) -> BulkOutcome {
        let outcome = match self.gateway.delete_assets(ids).await {
            Ok(()) => {
                self.state.write().await.remove_assets(ids);
                BulkOutcome {
                    action: BulkAction::Delete,
                    done: ids.len(),
                    failed: 0,
                }
            }
            Err(error) => {
                tracing::warn!(%error, count = ids.len(), "bulk asset delete failed");
                BulkOutcome {
                    action: BulkAction::Delete,
                    done: 0,
                    failed: ids.len(),
                }
            }
        };
        self.report_bulk(outcome);
        outcome
    }

    fn surface_write_failure(&self, error: GatewayError) -> CoreError {
        tracing::warn!(%error, "write refused; local state untouched");
        let _ = self.notices.send(Notification::WriteFailed {
            message: error.to_string(),
        });
        error.into()
    }

    fn report_bulk(&self, outcome: BulkOutcome) {
        let _ = self.notices.send(Notification::BulkCompleted {
            action: outcome.action,
            done: outcome.done,
            failed: outcome.failed,
        });
    }
}

/// Rewrite the display caches inside a patch that replaces variants.
fn sync_variant_caches(patch: &mut ProductPatch) {
    if let Some(variants) = &patch.variants {
        if !variants.is_empty() {
            let rollup = rollup_variants(variants);
            patch.stock = Some(i64::from(rollup.stock));
            patch.unit_cost = Some(rollup.average_unit_cost().as_i64());
        }
    }
}
