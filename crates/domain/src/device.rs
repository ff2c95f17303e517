//! Device — an addressable physical endpoint owned by exactly one adapter.
//!
//! A [`Device`] is static configuration. The runtime state the router keeps
//! about a device (whether it is probably on, which color it last showed) is
//! owned by the component that writes it, never stored here.

use serde::{Deserialize, Serialize};

use crate::capability::Capabilities;
use crate::error::{HubError, ValidationError};
use crate::id::{AdapterId, DeviceId};

/// A device as loaded from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    /// The adapter whose outbound queue receives this device's commands.
    pub adapter_id: AdapterId,
    /// Adapter-local address (Bluetooth MAC, CoAP instance id, hub device id).
    /// Empty when the adapter needs no sub-addressing.
    pub adapters_device_id: String,
    pub name: String,
    pub description: String,
    /// Adapter-specific command token used to turn the device on.
    pub power_on_cmd: Option<String>,
    /// Adapter-specific command token used to turn the device off.
    pub power_off_cmd: Option<String>,
    pub capabilities: Capabilities,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] when the id, adapter id or name is empty.
    pub fn validate(&self) -> Result<(), HubError> {
        if self.id.is_empty() {
            return Err(ValidationError::EmptyId("device").into());
        }
        if self.adapter_id.is_empty() {
            return Err(ValidationError::EmptyId("adapter").into());
        }
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }

    /// The command token for the requested power state, if configured.
    #[must_use]
    pub fn power_command(&self, on: bool) -> Option<&str> {
        if on {
            self.power_on_cmd.as_deref()
        } else {
            self.power_off_cmd.as_deref()
        }
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    adapter_id: Option<AdapterId>,
    adapters_device_id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    power_on_cmd: Option<String>,
    power_off_cmd: Option<String>,
    capabilities: Capabilities,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<DeviceId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn adapter_id(mut self, adapter_id: impl Into<AdapterId>) -> Self {
        self.adapter_id = Some(adapter_id.into());
        self
    }

    #[must_use]
    pub fn adapters_device_id(mut self, adapters_device_id: impl Into<String>) -> Self {
        self.adapters_device_id = Some(adapters_device_id.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn power_commands(mut self, on: impl Into<String>, off: impl Into<String>) -> Self {
        self.power_on_cmd = Some(on.into());
        self.power_off_cmd = Some(off.into());
        self
    }

    #[must_use]
    pub fn capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] if the id, adapter id or name is
    /// missing or empty.
    pub fn build(self) -> Result<Device, HubError> {
        let device = Device {
            id: self.id.unwrap_or_else(|| DeviceId::new("")),
            adapter_id: self.adapter_id.unwrap_or_else(|| AdapterId::new("")),
            adapters_device_id: self.adapters_device_id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            power_on_cmd: self.power_on_cmd,
            power_off_cmd: self.power_off_cmd,
            capabilities: self.capabilities,
        };
        device.validate()?;
        Ok(device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amplifier() -> Device {
        Device::builder()
            .id("c0730bb2")
            .adapter_id("harmony")
            .adapters_device_id("47917687")
            .name("Amplifier")
            .description("Onkyo TX-NR515")
            .power_commands("PowerOn", "PowerOff")
            .capabilities(Capabilities::power_only())
            .build()
            .unwrap()
    }

    #[test]
    fn should_build_valid_device() {
        let device = amplifier();
        assert_eq!(device.id.as_str(), "c0730bb2");
        assert_eq!(device.adapter_id.as_str(), "harmony");
        assert_eq!(device.adapters_device_id, "47917687");
        assert!(device.capabilities.power);
    }

    #[test]
    fn should_allow_empty_adapters_device_id() {
        let device = Device::builder()
            .id("d2ff0882")
            .adapter_id("particle")
            .name("Sofa light")
            .build()
            .unwrap();
        assert!(device.adapters_device_id.is_empty());
        assert!(device.power_on_cmd.is_none());
    }

    #[test]
    fn should_reject_missing_id() {
        let result = Device::builder().adapter_id("a").name("n").build();
        assert!(matches!(
            result,
            Err(HubError::Validation(ValidationError::EmptyId("device")))
        ));
    }

    #[test]
    fn should_reject_missing_adapter() {
        let result = Device::builder().id("d").name("n").build();
        assert!(matches!(
            result,
            Err(HubError::Validation(ValidationError::EmptyId("adapter")))
        ));
    }

    #[test]
    fn should_reject_empty_name() {
        let result = Device::builder().id("d").adapter_id("a").build();
        assert!(matches!(
            result,
            Err(HubError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_pick_power_command_by_state() {
        let device = amplifier();
        assert_eq!(device.power_command(true), Some("PowerOn"));
        assert_eq!(device.power_command(false), Some("PowerOff"));
    }
}
