//! Orchestration over the gateway: validated writes and refresh timing.

pub mod refresh;
pub mod service;

pub use refresh::{guarded, guarded_fetch, Loudness, RefreshCoordinator};
pub use service::{BulkOutcome, CatalogService};
