//! Refresh coordination: when to re-pull collections, and how to keep a
//! slow gateway from freezing the UI.

use crate::config::Settings;
use crate::domain::EntityKind;
use crate::gateway::{GatewayError, PersistenceGateway};
use crate::state::{ChangeFeed, Notification, NotificationSender, SharedState, Subscription};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Whether a refresh surfaces loading/error feedback.
///
/// User-initiated refreshes are loud; push-triggered ones are silent so
/// the user never sees a spinner flash for work they did not ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loudness {
    Loud,
    Silent,
}

/// Race an operation against a timer.
///
/// The operation runs on its own task; if the timer wins it is left to
/// finish in the background and its result is discarded, since the
/// gateway offers no cancellation. Never panics out of the race.
pub async fn guarded<T, F>(operation: F, timeout: Duration) -> Result<T, GatewayError>
where
    F: Future<Output = Result<T, GatewayError>> + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::spawn(operation);
    match tokio::time::timeout(timeout, handle).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => Err(GatewayError::Unavailable(join_error.to_string())),
        Err(_elapsed) => Err(GatewayError::TimedOut),
    }
}

/// [`guarded`], degraded to a fallback value instead of an error. Bounds
/// worst-case staleness: the caller re-triggers a normal refresh for
/// fresh data.
pub async fn guarded_fetch<T, F>(operation: F, timeout: Duration, fallback: T) -> T
where
    F: Future<Output = Result<T, GatewayError>> + Send + 'static,
    T: Send + 'static,
{
    guarded(operation, timeout).await.unwrap_or_else(|error| {
        tracing::warn!(%error, "guarded fetch degraded to fallback");
        fallback
    })
}

#[derive(Debug, Default)]
struct Flight {
    running: bool,
    dirty: bool,
}

/// Decides when to re-pull collections from the gateway.
///
/// At most one refresh per entity is in flight; signals arriving while
/// one runs coalesce into a single follow-up pass (last write wins at
/// the gateway, so strict sequencing buys nothing).
#[derive(Clone)]
pub struct RefreshCoordinator {
    gateway: Arc<dyn PersistenceGateway>,
    state: SharedState,
    notices: NotificationSender,
    settings: Settings,
    flights: Arc<Mutex<HashMap<EntityKind, Flight>>>,
}

impl RefreshCoordinator {
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
            flights: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Subscribe the coordinator to push invalidations. The returned
    /// subscriptions must be kept alive by the caller.
    pub fn attach(&self, feed: &ChangeFeed) -> Vec<Subscription> {
        [EntityKind::Product, EntityKind::Asset, EntityKind::Settings]
            .into_iter()
            .map(|kind| {
                let coordinator = self.clone();
                feed.subscribe(kind, move |k| coordinator.schedule_silent(k))
            })
            .collect()
    }

    /// Queue a silent refresh without waiting for it.
    pub fn schedule_silent(&self, kind: EntityKind) {
        let coordinator = self.clone();
        tokio::spawn(async move {
            coordinator.refresh(kind, Loudness::Silent).await;
        });
    }

    /// Re-pull one collection. Returns once this call's work is done;
    /// if another refresh for the same entity is already in flight the
    /// signal is folded into it and this call returns immediately.
    pub async fn refresh(&self, kind: EntityKind, loudness: Loudness) {
        {
            let mut flights = self.flights.lock().await;
            let flight = flights.entry(kind).or_default();
            if flight.running {
                flight.dirty = true;
                tracing::debug!(entity = %kind, "refresh coalesced into in-flight fetch");
                return;
            }
            flight.running = true;
        }

        let mut loudness = loudness;
        loop {
            self.run_once(kind, loudness).await;
            let run_again = {
                let mut flights = self.flights.lock().await;
                let flight = flights.entry(kind).or_default();
                if flight.dirty {
                    flight.dirty = false;
                    true
                } else {
                    flight.running = false;
                    false
                }
            };
            if !run_again {
                break;
            }
            // follow-ups come from push signals
            loudness = Loudness::Silent;
        }
    }

    async fn run_once(&self, kind: EntityKind, loudness: Loudness) {
        if kind == EntityKind::Settings {
            // settings are re-read from the environment by the consumer;
            // there is no collection to pull
            tracing::debug!("settings change acknowledged, nothing to fetch");
            return;
        }

        if loudness == Loudness::Loud {
            self.state.write().await.set_loading(true);
        }

        let timeout = Duration::from_millis(self.settings.fetch_timeout_ms);
        match kind {
            EntityKind::Product => {
                let gateway = Arc::clone(&self.gateway);
                let result = guarded(async move { gateway.list_products().await }, timeout).await;
                let mut state = self.state.write().await;
                match result {
                    Ok(products) => state.replace_products(products),
                    Err(error) => {
                        state.degrade_products();
                        self.report_read_fault(kind, loudness, &error, state.note_read_fault());
                    }
                }
            }
            EntityKind::Asset => {
                let gateway = Arc::clone(&self.gateway);
                let result = guarded(async move { gateway.list_assets().await }, timeout).await;
                let mut state = self.state.write().await;
                match result {
                    Ok(assets) => state.replace_assets(assets),
                    Err(error) => {
                        state.degrade_assets();
                        self.report_read_fault(kind, loudness, &error, state.note_read_fault());
                    }
                }
            }
            EntityKind::Settings => unreachable!("handled above"),
        }

        if loudness == Loudness::Loud {
            self.state.write().await.set_loading(false);
        }
    }

    fn report_read_fault(
        &self,
        kind: EntityKind,
        loudness: Loudness,
        error: &GatewayError,
        first_since_success: bool,
    ) {
        tracing::warn!(%error, entity = %kind, "refresh degraded to empty fallback");
        if loudness == Loudness::Loud && first_since_success {
            let _ = self
                .notices
                .send(Notification::CatalogUnavailable { entity: kind });
        }
    }
}
