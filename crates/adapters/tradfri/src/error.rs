//! Tradfri adapter error types.

use homerouter_domain::error::HubError;

/// Errors specific to the Tradfri adapter.
#[derive(Debug, thiserror::Error)]
pub enum TradfriError {
    /// The gateway URL is missing or not a `coaps://` URL.
    #[error("invalid gateway url {0:?}, expected coaps://host:port")]
    InvalidUrl(String),

    /// The gateway identity or pre-shared key is missing.
    #[error("missing gateway credential {0}")]
    MissingCredential(&'static str),

    /// The adapter's settings blob could not be decoded.
    #[error("invalid tradfri adapter settings")]
    Settings(#[from] serde_json::Error),
}

impl TradfriError {
    /// Convert into a [`HubError::Transport`] for propagation across port
    /// boundaries.
    #[must_use]
    pub fn into_domain(self) -> HubError {
        HubError::Transport(Box::new(self))
    }
}

impl From<TradfriError> for HubError {
    fn from(err: TradfriError) -> Self {
        err.into_domain()
    }
}
