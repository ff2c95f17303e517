//! Triones adapter settings.

use serde::Deserialize;

use crate::error::TrionesError;

/// GATT characteristic the controllers accept commands on.
pub const DEFAULT_WRITE_CHARACTERISTIC: &str = "0000ffd9-0000-1000-8000-00805f9b34fb";

/// Settings read from the adapter's `settings` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrionesConfig {
    /// UUID of the characteristic frames are written to.
    pub write_characteristic: String,
}

impl Default for TrionesConfig {
    fn default() -> Self {
        Self {
            write_characteristic: DEFAULT_WRITE_CHARACTERISTIC.to_string(),
        }
    }
}

impl TrionesConfig {
    /// Decode from an adapter's opaque settings. `null` means defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TrionesError::Settings`] when the blob has the wrong shape.
    pub fn from_settings(settings: &serde_json::Value) -> Result<Self, TrionesError> {
        if settings.is_null() {
            return Ok(Self::default());
        }
        Ok(Self::deserialize(settings)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_when_settings_missing() {
        let config = TrionesConfig::from_settings(&serde_json::Value::Null).unwrap();
        assert_eq!(config.write_characteristic, DEFAULT_WRITE_CHARACTERISTIC);
    }

    #[test]
    fn should_read_characteristic_override() {
        let settings = serde_json::json!({ "write_characteristic": "0000ffe9-0000-1000-8000-00805f9b34fb" });
        let config = TrionesConfig::from_settings(&settings).unwrap();
        assert_eq!(
            config.write_characteristic,
            "0000ffe9-0000-1000-8000-00805f9b34fb"
        );
    }

    #[test]
    fn should_reject_malformed_settings() {
        let settings = serde_json::json!({ "write_characteristic": 42 });
        assert!(matches!(
            TrionesConfig::from_settings(&settings),
            Err(TrionesError::Settings(_))
        ));
    }
}
