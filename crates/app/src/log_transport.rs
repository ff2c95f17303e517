//! A transport that logs requests instead of sending them.
//!
//! Used for adapters configured with `kind = "log"` and for dry runs of
//! real adapter kinds whose hardware client is not wired in.

use std::fmt::Debug;

use homerouter_domain::error::HubError;
use homerouter_domain::id::AdapterId;

use crate::ports::Transport;

/// Logs every request at `info` level and reports success.
#[derive(Debug, Clone)]
pub struct LoggingTransport {
    adapter_id: AdapterId,
}

impl LoggingTransport {
    #[must_use]
    pub fn new(adapter_id: AdapterId) -> Self {
        Self { adapter_id }
    }
}

impl<R: Debug + Send + 'static> Transport<R> for LoggingTransport {
    async fn send(&self, request: R) -> Result<(), HubError> {
        tracing::info!(adapter = %self.adapter_id, ?request, "request (not sent, logging transport)");
        Ok(())
    }
}
