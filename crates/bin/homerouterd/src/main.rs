//! # homerouterd — homerouter daemon
//!
//! Composition root that loads the device tables and wires input sources,
//! the dispatcher and the output adapters together.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize logging
//! - Build and validate the routing tables
//! - Spawn one worker per adapter, then the dispatcher, then input sources
//! - Stop everything on SIGINT
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no routing logic belongs here.

mod adapters;
mod catalog;
mod config;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use homerouter_adapter_simulator::InfraredSimulator;
use homerouter_app::dispatcher::Dispatcher;

use crate::config::Config;

fn init_logging(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    init_logging(&config.logging.filter);

    let registry = Arc::new(config.registry()?);
    catalog::log(&registry);

    let stop = CancellationToken::new();

    // Adapters first, so the dispatcher never sees an unregistered queue.
    let (router, mut tasks) =
        adapters::spawn_all(&registry, config.dispatcher.request_timeout(), &stop)?;

    let (dispatcher, dispatcher_task) = Dispatcher::new(Arc::clone(&registry), router, stop.clone())
        .with_policy(config.dispatcher.group_policy)
        .spawn();
    tasks.push(dispatcher_task);

    if let Some(simulator) = InfraredSimulator::from_config(&config.simulator) {
        tasks.push(simulator.spawn(dispatcher.clone(), stop.clone()));
    }

    tracing::info!("homerouterd running, press ctrl-c to stop");
    tokio::signal::ctrl_c().await?;
    tracing::info!("received interrupt");

    stop.cancel();
    drop(dispatcher);
    for task in tasks {
        if let Err(err) = task.await {
            tracing::error!(error = %err, "component panicked");
        }
    }

    tracing::info!("all components stopped");
    Ok(())
}
