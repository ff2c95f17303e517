//! Adapter wiring — one outbound queue and one worker per configured adapter.
//!
//! Hardware clients (Bluetooth LE, CoAP/DTLS, hub sessions) are not linked
//! into this binary: every adapter's final stage is a [`LoggingTransport`],
//! so requests are fully translated and encoded, then logged.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use homerouter_adapter_happylights::HappyLightsTranslator;
use homerouter_adapter_tradfri::{Gateway, TradfriConfig, TradfriTranslator};
use homerouter_adapter_triones::{FrameEncoder, TrionesConfig, TrionesTranslator};
use homerouter_app::adapter_worker::AdapterWorker;
use homerouter_app::command_translator::CommandTranslator;
use homerouter_app::log_transport::LoggingTransport;
use homerouter_app::outbound::{AdapterRouter, outbound_queue};
use homerouter_app::registry::Registry;
use homerouter_domain::adapter::{AdapterConfig, AdapterKind};
use homerouter_domain::error::HubError;

use crate::config::ConfigError;

/// Create every adapter's queue and spawn its worker.
///
/// # Errors
///
/// Returns [`ConfigError::Adapter`] when an adapter's settings are rejected;
/// no worker is spawned in that case.
pub fn spawn_all(
    registry: &Arc<Registry>,
    request_timeout: Duration,
    stop: &CancellationToken,
) -> Result<(AdapterRouter, Vec<JoinHandle<()>>), ConfigError> {
    let adapters = registry.adapters();
    let mut prepared = Vec::with_capacity(adapters.len());
    for adapter in adapters {
        prepared.push((adapter, prepare(adapter)?));
    }

    let mut router = AdapterRouter::new();
    let mut workers = Vec::with_capacity(prepared.len());
    for (adapter, stage) in prepared {
        let (tx, rx) = outbound_queue(adapter.id.clone());
        router = router.with(tx);

        let id = adapter.id.clone();
        let transport = LoggingTransport::new(id.clone());
        let registry = Arc::clone(registry);
        let worker = match stage {
            Stage::Triones(config) => AdapterWorker::new(
                id,
                TrionesTranslator,
                FrameEncoder::new(config, transport),
                registry,
            )
            .with_request_timeout(request_timeout)
            .spawn(rx, stop.clone()),
            Stage::Tradfri(config) => AdapterWorker::new(
                id,
                TradfriTranslator,
                Gateway::new(config, transport),
                registry,
            )
            .with_request_timeout(request_timeout)
            .spawn(rx, stop.clone()),
            Stage::HappyLights => {
                AdapterWorker::new(id, HappyLightsTranslator, transport, registry)
                    .with_request_timeout(request_timeout)
                    .spawn(rx, stop.clone())
            }
            Stage::Command(kind) => {
                AdapterWorker::new(id, CommandTranslator::new(kind), transport, registry)
                    .with_request_timeout(request_timeout)
                    .spawn(rx, stop.clone())
            }
        };
        workers.push(worker);
    }

    Ok((router, workers))
}

/// Settings decoded ahead of spawning, so a bad adapter aborts startup
/// before any task runs.
enum Stage {
    Triones(TrionesConfig),
    Tradfri(TradfriConfig),
    HappyLights,
    Command(&'static str),
}

fn prepare(adapter: &AdapterConfig) -> Result<Stage, ConfigError> {
    let invalid = |source: HubError| ConfigError::Adapter {
        adapter: adapter.id.to_string(),
        source,
    };
    let stage = match adapter.kind {
        AdapterKind::Triones => Stage::Triones(
            TrionesConfig::from_settings(&adapter.settings)
                .map_err(|err| invalid(err.into_domain()))?,
        ),
        AdapterKind::Tradfri => Stage::Tradfri(
            TradfriConfig::from_settings(&adapter.settings)
                .map_err(|err| invalid(err.into_domain()))?,
        ),
        AdapterKind::Harmony => Stage::Command("harmony"),
        AdapterKind::Particle => Stage::Command("particle"),
        AdapterKind::Happylights => Stage::HappyLights,
        AdapterKind::Simulator => Stage::Command("simulator"),
        AdapterKind::Log => Stage::Command("log"),
    };
    Ok(stage)
}
