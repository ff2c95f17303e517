//! Simulator configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the infrared simulator.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Remote key to emit. The simulator is disabled when unset.
    pub infrared_key: Option<String>,
    /// Seconds between two emitted key presses.
    pub interval_secs: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            infrared_key: None,
            interval_secs: 5,
        }
    }
}

impl SimulatorConfig {
    /// Emission interval, never shorter than one second.
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}
