//! Simulation errors
//!
//! Only configuration problems surface as `Err`. Placement exhaustion is a
//! runtime condition: it is built as a value so it renders consistently in
//! logs, but the session always carries on.

use thiserror::Error;

/// Errors raised by the simulation core.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
    #[error("could not place {what} after {attempts} attempts")]
    PlacementExhausted { what: &'static str, attempts: u32 },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        SimError::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
