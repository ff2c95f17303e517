//! Triones adapter error types.

use homerouter_domain::error::HubError;

/// Errors specific to the Triones adapter.
#[derive(Debug, thiserror::Error)]
pub enum TrionesError {
    /// An adapter-local device id is not a Bluetooth address.
    #[error("invalid bluetooth address {0:?}")]
    InvalidAddress(String),

    /// The adapter's settings blob could not be decoded.
    #[error("invalid triones adapter settings")]
    Settings(#[from] serde_json::Error),
}

impl TrionesError {
    /// Convert into a [`HubError::Transport`] for propagation across port
    /// boundaries.
    #[must_use]
    pub fn into_domain(self) -> HubError {
        HubError::Transport(Box::new(self))
    }
}

impl From<TrionesError> for HubError {
    fn from(err: TrionesError) -> Self {
        err.into_domain()
    }
}
