//! Explicit application state and the typed notification channels.
//!
//! Nothing here is ambient: the presentation layer owns a
//! [`SharedState`] handle, a [`NotificationReceiver`] for user-visible
//! messages, and [`Subscription`]s on the [`ChangeFeed`]. Components
//! receive these by reference.

use crate::domain::{EntityKind, InternalAsset, Product};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tokio::sync::mpsc;

/// Snapshot store for the collections the presentation layer renders.
#[derive(Debug, Default)]
pub struct CatalogState {
    products: Vec<Product>,
    assets: Vec<InternalAsset>,
    loading: bool,
    read_fault_noted: bool,
}

/// The state handle passed between the service, the coordinator and the
/// presentation layer.
pub type SharedState = Arc<tokio::sync::RwLock<CatalogState>>;

pub fn shared_state() -> SharedState {
    Arc::new(tokio::sync::RwLock::new(CatalogState::default()))
}

impl CatalogState {
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn assets(&self) -> &[InternalAsset] {
        &self.assets
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Install a fresh product snapshot; a successful read re-arms the
    /// read-fault latch.
    pub fn replace_products(&mut self, products: Vec<Product>) {
        tracing::debug!(count = products.len(), "product snapshot replaced");
        self.products = products;
        self.read_fault_noted = false;
    }

    /// Install a fresh asset snapshot; a successful read re-arms the
    /// read-fault latch.
    pub fn replace_assets(&mut self, assets: Vec<InternalAsset>) {
        tracing::debug!(count = assets.len(), "asset snapshot replaced");
        self.assets = assets;
        self.read_fault_noted = false;
    }

    /// Apply a saved product to the snapshot (insert or replace).
    pub fn upsert_product(&mut self, product: Product) {
        match self.products.iter_mut().find(|p| p.id == product.id) {
            Some(slot) => *slot = product,
            None => self.products.push(product),
        }
    }

    /// Apply a saved asset to the snapshot (insert or replace).
    pub fn upsert_asset(&mut self, asset: InternalAsset) {
        match self.assets.iter_mut().find(|a| a.id == asset.id) {
            Some(slot) => *slot = asset,
            None => self.assets.push(asset),
        }
    }

    pub fn remove_products(&mut self, ids: &[uuid::Uuid]) {
        self.products.retain(|p| !ids.contains(&p.id));
    }

    pub fn remove_assets(&mut self, ids: &[uuid::Uuid]) {
        self.assets.retain(|a| !ids.contains(&a.id));
    }

    /// Degrade to an empty product snapshot after a failed read. Unlike
    /// [`replace_products`](Self::replace_products) this does not re-arm
    /// the read-fault latch.
    pub fn degrade_products(&mut self) {
        self.products = Vec::new();
    }

    /// Degrade to an empty asset snapshot after a failed read.
    pub fn degrade_assets(&mut self) {
        self.assets = Vec::new();
    }

    /// Record a failed read. Returns true only for the first fault since
    /// the last successful read, so a flapping gateway is reported once
    /// instead of once per retry.
    pub fn note_read_fault(&mut self) -> bool {
        if self.read_fault_noted {
            false
        } else {
            self.read_fault_noted = true;
            true
        }
    }
}

/// A user-visible message. Presentation decides how to render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A read degraded to the empty fallback; sent once per outage.
    CatalogUnavailable { entity: EntityKind },
    /// A write was refused; local state was left untouched.
    WriteFailed { message: String },
    /// One summary for a whole batch, never one message per item.
    BulkCompleted {
        action: BulkAction,
        done: usize,
        failed: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Delete,
    StatusChange,
    Relocate,
}

impl std::fmt::Display for BulkAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BulkAction::Delete => write!(f, "delete"),
            BulkAction::StatusChange => write!(f, "status change"),
            BulkAction::Relocate => write!(f, "relocate"),
        }
    }
}

pub type NotificationSender = mpsc::UnboundedSender<Notification>;
pub type NotificationReceiver = mpsc::UnboundedReceiver<Notification>;

pub fn notification_channel() -> (NotificationSender, NotificationReceiver) {
    mpsc::unbounded_channel()
}

type ChangeCallback = Arc<dyn Fn(EntityKind) + Send + Sync>;

struct Subscriber {
    id: u64,
    kind: EntityKind,
    callback: ChangeCallback,
}

#[derive(Default)]
struct FeedInner {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

/// Typed invalidation channel fed by the external push notifier.
///
/// The notifier guarantees no payload beyond the entity kind; the only
/// valid reaction is to schedule a refresh of that collection. The core
/// never polls.
#[derive(Clone, Default)]
pub struct ChangeFeed {
    inner: Arc<Mutex<FeedInner>>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for one entity kind. Dropping the returned
    /// [`Subscription`] unsubscribes.
    pub fn subscribe(
        &self,
        kind: EntityKind,
        callback: impl Fn(EntityKind) + Send + Sync + 'static,
    ) -> Subscription {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.subscribers.push(Subscriber {
            id,
            kind,
            callback: Arc::new(callback),
        });
        Subscription {
            feed: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Deliver a change signal to every subscriber of that kind.
    pub fn notify(&self, kind: EntityKind) {
        // collect first so a callback may subscribe/notify without deadlock
        let callbacks: Vec<ChangeCallback> = self
            .lock()
            .subscribers
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| Arc::clone(&s.callback))
            .collect();
        for callback in callbacks {
            callback(kind);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FeedInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Keeps a [`ChangeFeed`] registration alive; unsubscribes on drop.
pub struct Subscription {
    feed: Weak<Mutex<FeedInner>>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.feed.upgrade() {
            let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.subscribers.retain(|s| s.id != self.id);
        }
    }
}
