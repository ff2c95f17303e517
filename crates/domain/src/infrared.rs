//! Static mapping from remote-control keys to power intents.

use serde::{Deserialize, Serialize};

use crate::event::PowerEvent;

/// Which way a mapped key switches its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerKind {
    On,
    Off,
}

impl PowerKind {
    #[must_use]
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

/// One remote key bound to a power intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfraredMapping {
    pub remote_key: String,
    /// Device id or device group id.
    pub to_device: String,
    pub power_kind: PowerKind,
}

impl InfraredMapping {
    #[must_use]
    pub fn new(remote_key: impl Into<String>, to_device: impl Into<String>, kind: PowerKind) -> Self {
        Self {
            remote_key: remote_key.into(),
            to_device: to_device.into(),
            power_kind: kind,
        }
    }

    /// The power intent a key press resolves to.
    #[must_use]
    pub fn intent(&self) -> PowerEvent {
        PowerEvent::new(self.to_device.clone(), self.power_kind.is_on())
    }
}
