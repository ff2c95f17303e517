//! Adapter — a boundary component that speaks one device family's protocol.
//!
//! The domain only knows an adapter's id, its kind (which selects the
//! translation rules) and an opaque settings blob the adapter crate parses.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HubError, ValidationError};
use crate::id::AdapterId;

/// Capacity of every adapter's outbound queue.
pub const OUTBOUND_QUEUE_CAPACITY: usize = 32;

/// The device family an adapter speaks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdapterKind {
    /// Bluetooth LE RGB(W) light controllers.
    Triones,
    /// CoAP-based bulbs behind a gateway.
    Tradfri,
    /// IR-controlled entertainment devices behind a remote hub.
    Harmony,
    /// Cloud-connected microcontroller relays.
    Particle,
    /// Bluetooth RGB lights bridged through a light server.
    Happylights,
    /// Synthetic input source, sends nothing.
    Simulator,
    /// Logs every request instead of talking to hardware.
    Log,
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Triones => "triones",
            Self::Tradfri => "tradfri",
            Self::Harmony => "harmony",
            Self::Particle => "particle",
            Self::Happylights => "happylights",
            Self::Simulator => "simulator",
            Self::Log => "log",
        };
        f.write_str(name)
    }
}

/// An adapter as loaded from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterConfig {
    pub id: AdapterId,
    pub kind: AdapterKind,
    /// Adapter-specific settings (endpoints, credentials). Parsed by the
    /// adapter crate, never inspected by the core.
    #[serde(default)]
    pub settings: serde_json::Value,
}

impl AdapterConfig {
    /// Create an adapter config with empty settings.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] when `id` is empty.
    pub fn new(id: impl Into<AdapterId>, kind: AdapterKind) -> Result<Self, HubError> {
        let config = Self {
            id: id.into(),
            kind,
            settings: serde_json::Value::Null,
        };
        if config.id.is_empty() {
            return Err(ValidationError::EmptyId("adapter").into());
        }
        Ok(config)
    }

    /// Attach a settings blob.
    #[must_use]
    pub fn with_settings(mut self, settings: serde_json::Value) -> Self {
        self.settings = settings;
        self
    }
}
