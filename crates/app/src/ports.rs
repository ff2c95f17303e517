//! Port definitions — traits that adapter crates implement.
//!
//! Ports are the boundaries between the routing core and the outside world.
//! They are defined here (in `app`) so that both the generic adapter worker
//! and the adapter crates can depend on them without circular dependencies.

pub mod translator;
pub mod transport;

pub use translator::{Translation, Translator};
pub use transport::Transport;
