use crate::config::ConfigError;
use crate::domain::ValidationError;
use crate::gateway::GatewayError;
use thiserror::Error;

/// Top-level error for callers that do not care which layer failed.
///
/// Validation errors stay local to form logic; gateway errors surface to
/// the user. Guarded computations (margins, ROI) never error at all:
/// a zero divisor yields a zero metric by construction.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
