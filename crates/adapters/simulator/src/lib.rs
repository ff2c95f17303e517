//! # homerouter-adapter-simulator
//!
//! Input source that pretends a remote-control key is pressed every few
//! seconds. Useful to exercise the whole dispatch path (infrared map →
//! dispatcher → adapter queue → translator) on a machine without an
//! infrared receiver.
//!
//! ## Dependency rule
//!
//! Depends on `homerouter-app` (dispatcher entry point) and
//! `homerouter-domain` only.

mod config;

pub use config::SimulatorConfig;

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use homerouter_app::dispatcher::DispatcherHandle;
use homerouter_domain::error::HubError;

/// Emits one infrared key on a fixed interval.
#[derive(Debug, Clone)]
pub struct InfraredSimulator {
    key: String,
    interval: Duration,
}

impl InfraredSimulator {
    #[must_use]
    pub fn new(key: impl Into<String>, interval: Duration) -> Self {
        Self {
            key: key.into(),
            interval,
        }
    }

    /// Build from configuration; `None` when no key is configured.
    #[must_use]
    pub fn from_config(config: &SimulatorConfig) -> Option<Self> {
        let key = config.infrared_key.as_deref().filter(|key| !key.is_empty())?;
        Some(Self::new(key, config.interval()))
    }

    /// Spawn the emission loop on the current runtime.
    pub fn spawn(self, dispatcher: DispatcherHandle, stop: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(dispatcher, stop))
    }

    /// Emit the key every interval until stopped or the dispatcher is gone.
    ///
    /// The first key press happens one interval after start.
    pub async fn run(self, dispatcher: DispatcherHandle, stop: CancellationToken) {
        tracing::info!(
            key = %self.key,
            interval_secs = self.interval.as_secs(),
            "infrared simulator started"
        );

        loop {
            tokio::select! {
                biased;
                () = stop.cancelled() => break,
                () = tokio::time::sleep(self.interval) => {}
            }

            tracing::debug!(key = %self.key, "simulating infrared key press");
            let submitted = tokio::select! {
                biased;
                () = stop.cancelled() => break,
                result = dispatcher.submit_infrared_event(self.key.clone()) => result,
            };

            if let Err(err) = submitted {
                if !matches!(err, HubError::Stopped) {
                    tracing::warn!(error = %err, "infrared simulator failed to submit");
                }
                break;
            }
        }

        tracing::info!("infrared simulator stopped");
    }
}
