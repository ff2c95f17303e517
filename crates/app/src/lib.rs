//! # homerouter-app
//!
//! Application layer — the dispatch-and-translation core and its **ports**.
//!
//! ## Responsibilities
//! - [`registry`]: immutable device / group / adapter / infrared tables,
//!   validated once at startup
//! - [`outbound`]: per-adapter bounded outbound queues and the router that
//!   addresses them by adapter id
//! - [`dispatcher`]: the single serialization point for power and infrared
//!   intents, owner of the advisory power state
//! - [`ports`]: traits adapters implement (`Translator`, `Transport`)
//! - [`adapter_worker`]: the generic per-adapter loop that translates queued
//!   events and sends them with a bounded timeout
//! - [`command_translator`] / [`log_transport`]: translator and transport
//!   for adapters that take named commands or only log their requests
//!
//! ## Dependency rule
//! Depends on `homerouter-domain` only (plus `tokio` for channels and tasks).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod adapter_worker;
pub mod command_translator;
pub mod dispatcher;
pub mod log_transport;
pub mod outbound;
pub mod ports;
pub mod registry;

mod color_memory;
mod power_state;
