//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`HubError`]
//! via `#[from]` or an explicit `into_domain()` (adapter crates).

use std::time::Duration;

/// Top-level error for the router.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// A builder or constructor invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// An intent or lookup targeted an id that is not registered.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// Startup data is inconsistent (dangling references, duplicates).
    #[error("configuration inconsistency")]
    Configuration(#[from] ConfigurationError),

    /// An adapter transport failed to deliver a request.
    #[error("transport error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// An adapter request exceeded its deadline.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// An adapter's worker is gone and its queue no longer accepts events.
    #[error("adapter {0} is not accepting events")]
    AdapterClosed(String),

    /// The dispatcher has stopped and no longer accepts events.
    #[error("dispatcher stopped")]
    Stopped,
}

/// Builder invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// An identifier was empty.
    #[error("{0} id must not be empty")]
    EmptyId(&'static str),

    /// A display name was empty.
    #[error("name must not be empty")]
    EmptyName,
}

/// A lookup miss for a registered entity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of thing that was looked up (e.g. `"Device or group"`).
    pub entity: &'static str,
    /// The id that missed.
    pub id: String,
}

/// Startup data that references things which do not exist, or defines the
/// same id twice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// A device group lists a device id that is not registered.
    #[error("device group {group} references unknown device {device}")]
    UnknownGroupMember { group: String, device: String },

    /// A device names an adapter that is not registered.
    #[error("device {device} references unknown adapter {adapter}")]
    UnknownAdapter { device: String, adapter: String },

    /// An infrared mapping targets neither a device nor a group.
    #[error("infrared key {key} targets unknown device or group {target}")]
    UnknownInfraredTarget { key: String, target: String },

    /// The same id was registered twice.
    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: String },

    /// A device id and a group id collide, making power intents ambiguous.
    #[error("id {0} is used by both a device and a device group")]
    AmbiguousTarget(String),
}
