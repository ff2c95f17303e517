//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `homerouter.toml` in the working directory, or the file named
//! by `HOMEROUTER_CONFIG`. Every section has a default so the file is
//! optional; without it the router starts with empty tables. Environment
//! variables take precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use homerouter_adapter_simulator::SimulatorConfig;
use homerouter_app::adapter_worker::DEFAULT_REQUEST_TIMEOUT;
use homerouter_app::registry::Registry;
use homerouter_domain::adapter::AdapterConfig;
use homerouter_domain::capability::Capabilities;
use homerouter_domain::device::Device;
use homerouter_domain::device_group::DeviceGroup;
use homerouter_domain::error::HubError;
use homerouter_domain::infrared::InfraredMapping;
use homerouter_domain::policy::GroupPowerPolicy;

const DEFAULT_PATH: &str = "homerouter.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Dispatcher and adapter worker tuning.
    pub dispatcher: DispatcherConfig,
    /// Output adapters, one outbound queue each.
    #[serde(rename = "adapter")]
    pub adapters: Vec<AdapterConfig>,
    /// Devices, each owned by one adapter.
    #[serde(rename = "device")]
    pub devices: Vec<DeviceConfig>,
    /// Named device groups.
    #[serde(rename = "device_group")]
    pub device_groups: Vec<DeviceGroupConfig>,
    /// Remote key → power intent bindings.
    pub ir_power: Vec<InfraredMapping>,
    /// Infrared simulator input.
    pub simulator: SimulatorConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Dispatcher and adapter worker settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Deadline for one adapter request, in seconds.
    pub request_timeout_secs: u64,
    /// Group power policies.
    pub group_policy: GroupPowerPolicy,
}

/// One `[[device]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct DeviceConfig {
    pub id: String,
    pub adapter: String,
    #[serde(default)]
    pub adapters_device_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub power_on_cmd: Option<String>,
    #[serde(default)]
    pub power_off_cmd: Option<String>,
    #[serde(default)]
    pub capability_power: bool,
    #[serde(default)]
    pub capability_brightness: bool,
    #[serde(default)]
    pub capability_color: bool,
    #[serde(default)]
    pub capability_color_temperature: bool,
    #[serde(default)]
    pub capability_color_separate_white_channel: bool,
    #[serde(default)]
    pub capability_playback: bool,
}

/// One `[[device_group]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceGroupConfig {
    pub id: String,
    pub name: String,
    pub devices: Vec<String>,
}

impl Config {
    /// Load configuration from `homerouter.toml` (or `HOMEROUTER_CONFIG`) if
    /// present, then apply environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is malformed or invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("HOMEROUTER_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("HOMEROUTER_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.dispatcher.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "request_timeout_secs must be non-zero".to_string(),
            ));
        }
        for device in &self.devices {
            if device.power_on_cmd.is_some() != device.power_off_cmd.is_some() {
                return Err(ConfigError::Validation(format!(
                    "device {} must set both power_on_cmd and power_off_cmd or neither",
                    device.id
                )));
            }
        }
        Ok(())
    }

    /// Build the validated routing tables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Registry`] when an entry is invalid or the
    /// tables reference ids that do not exist.
    pub fn registry(&self) -> Result<Registry, ConfigError> {
        let mut builder = Registry::builder();
        for adapter in &self.adapters {
            builder = builder.adapter(adapter.clone());
        }
        for device in &self.devices {
            builder = builder.device(device.to_device()?);
        }
        for group in &self.device_groups {
            let group = DeviceGroup::new(
                group.id.as_str(),
                group.name.as_str(),
                group.devices.iter().map(String::as_str),
            )?;
            builder = builder.group(group);
        }
        for mapping in &self.ir_power {
            builder = builder.infrared(mapping.clone());
        }
        Ok(builder.build()?)
    }
}

impl DispatcherConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl DeviceConfig {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            power: self.capability_power,
            brightness: self.capability_brightness,
            color: self.capability_color,
            color_temperature: self.capability_color_temperature,
            color_separate_white_channel: self.capability_color_separate_white_channel,
            playback: self.capability_playback,
        }
    }

    fn to_device(&self) -> Result<Device, HubError> {
        let mut builder = Device::builder()
            .id(self.id.as_str())
            .adapter_id(self.adapter.as_str())
            .adapters_device_id(self.adapters_device_id.as_str())
            .name(self.name.as_str())
            .description(self.description.as_str())
            .capabilities(self.capabilities());
        if let (Some(on), Some(off)) = (&self.power_on_cmd, &self.power_off_cmd) {
            builder = builder.power_commands(on.as_str(), off.as_str());
        }
        builder.build()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "homerouterd=info,homerouter=info".to_string(),
        }
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
            group_policy: GroupPowerPolicy::default(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
    /// The device tables are invalid or inconsistent.
    #[error("invalid device tables")]
    Registry(#[from] HubError),
    /// An adapter's settings were rejected by its adapter crate.
    #[error("invalid settings for adapter {adapter}")]
    Adapter {
        adapter: String,
        #[source]
        source: HubError,
    },
}
