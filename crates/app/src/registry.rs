//! Registry — the immutable routing tables.
//!
//! Built once at startup through [`RegistryBuilder`], which checks every
//! cross-reference (device → adapter, group → device, infrared key →
//! target). After [`RegistryBuilder::build`] nothing can be added or
//! removed; the registry is shared as an `Arc<Registry>`.

use std::collections::HashMap;

use homerouter_domain::adapter::AdapterConfig;
use homerouter_domain::capability::Capabilities;
use homerouter_domain::device::Device;
use homerouter_domain::device_group::DeviceGroup;
use homerouter_domain::error::{ConfigurationError, HubError};
use homerouter_domain::id::{AdapterId, DeviceGroupId, DeviceId};
use homerouter_domain::infrared::InfraredMapping;

/// What a power intent's target id resolved to.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    Device(&'a Device),
    Group(&'a DeviceGroup),
}

/// Validated, read-only routing tables.
#[derive(Debug, Default)]
pub struct Registry {
    adapters: HashMap<AdapterId, AdapterConfig>,
    devices: HashMap<DeviceId, Device>,
    groups: HashMap<DeviceGroupId, DeviceGroup>,
    infrared: HashMap<String, InfraredMapping>,
    /// `(adapter id, adapter-local address)` → device id.
    by_local_address: HashMap<(AdapterId, String), DeviceId>,
}

impl Registry {
    /// Start building a registry.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    #[must_use]
    pub fn adapter(&self, id: &str) -> Option<&AdapterConfig> {
        self.adapters.get(id)
    }

    #[must_use]
    pub fn device(&self, id: &str) -> Option<&Device> {
        self.devices.get(id)
    }

    #[must_use]
    pub fn group(&self, id: &str) -> Option<&DeviceGroup> {
        self.groups.get(id)
    }

    /// Look up the power intent bound to a remote key.
    #[must_use]
    pub fn infrared(&self, key: &str) -> Option<&InfraredMapping> {
        self.infrared.get(key)
    }

    /// Resolve a power-intent target: devices first, then groups.
    #[must_use]
    pub fn resolve_target(&self, id: &str) -> Option<Target<'_>> {
        if let Some(device) = self.device(id) {
            return Some(Target::Device(device));
        }
        self.group(id).map(Target::Group)
    }

    /// Capabilities of the device an adapter addresses as `local_id`.
    #[must_use]
    pub fn capabilities_for(&self, adapter_id: &AdapterId, local_id: &str) -> Option<Capabilities> {
        self.by_local_address
            .get(&(adapter_id.clone(), local_id.to_string()))
            .and_then(|id| self.devices.get(id))
            .map(|device| device.capabilities)
    }

    /// All adapters, ordered by id.
    #[must_use]
    pub fn adapters(&self) -> Vec<&AdapterConfig> {
        let mut adapters: Vec<_> = self.adapters.values().collect();
        adapters.sort_by(|a, b| a.id.cmp(&b.id));
        adapters
    }

    /// All devices, ordered by id.
    #[must_use]
    pub fn devices(&self) -> Vec<&Device> {
        let mut devices: Vec<_> = self.devices.values().collect();
        devices.sort_by(|a, b| a.id.cmp(&b.id));
        devices
    }

    /// All device groups, ordered by id.
    #[must_use]
    pub fn groups(&self) -> Vec<&DeviceGroup> {
        let mut groups: Vec<_> = self.groups.values().collect();
        groups.sort_by(|a, b| a.id.cmp(&b.id));
        groups
    }

    /// Number of infrared keys with a mapping.
    #[must_use]
    pub fn infrared_len(&self) -> usize {
        self.infrared.len()
    }
}

/// Collects startup data and validates it into a [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    adapters: Vec<AdapterConfig>,
    devices: Vec<Device>,
    groups: Vec<DeviceGroup>,
    infrared: Vec<InfraredMapping>,
}

impl RegistryBuilder {
    #[must_use]
    pub fn adapter(mut self, adapter: AdapterConfig) -> Self {
        self.adapters.push(adapter);
        self
    }

    #[must_use]
    pub fn device(mut self, device: Device) -> Self {
        self.devices.push(device);
        self
    }

    #[must_use]
    pub fn group(mut self, group: DeviceGroup) -> Self {
        self.groups.push(group);
        self
    }

    #[must_use]
    pub fn infrared(mut self, mapping: InfraredMapping) -> Self {
        self.infrared.push(mapping);
        self
    }

    /// Validate all cross-references and freeze the tables.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] when an item violates its own
    /// invariants, or [`HubError::Configuration`] when ids are duplicated,
    /// a device id collides with a group id, a device names an unknown
    /// adapter, a group names an unknown device, or an infrared key targets
    /// an unknown id.
    pub fn build(self) -> Result<Registry, HubError> {
        let mut registry = Registry::default();

        for adapter in self.adapters {
            if registry.adapters.contains_key(&adapter.id) {
                return Err(duplicate("adapter", adapter.id.as_str()));
            }
            registry.adapters.insert(adapter.id.clone(), adapter);
        }

        let mut unaddressed: HashMap<AdapterId, Vec<DeviceId>> = HashMap::new();
        for device in self.devices {
            device.validate()?;
            if registry.devices.contains_key(&device.id) {
                return Err(duplicate("device", device.id.as_str()));
            }
            if !registry.adapters.contains_key(&device.adapter_id) {
                return Err(ConfigurationError::UnknownAdapter {
                    device: device.id.to_string(),
                    adapter: device.adapter_id.to_string(),
                }
                .into());
            }
            if device.adapters_device_id.is_empty() {
                unaddressed
                    .entry(device.adapter_id.clone())
                    .or_default()
                    .push(device.id.clone());
            } else {
                let key = (device.adapter_id.clone(), device.adapters_device_id.clone());
                if let Some(existing) = registry.by_local_address.get(&key) {
                    tracing::warn!(
                        adapter = %device.adapter_id,
                        address = %device.adapters_device_id,
                        first = %existing,
                        ignored = %device.id,
                        "two devices share an adapter-local address, capabilities follow the first"
                    );
                } else {
                    registry.by_local_address.insert(key, device.id.clone());
                }
            }
            registry.devices.insert(device.id.clone(), device);
        }

        // An adapter without sub-addressing reports its device as "".
        for (adapter_id, mut device_ids) in unaddressed {
            if device_ids.len() == 1 {
                let device_id = device_ids.remove(0);
                registry
                    .by_local_address
                    .insert((adapter_id, String::new()), device_id);
            } else {
                device_ids.sort();
                tracing::warn!(
                    adapter = %adapter_id,
                    devices = ?device_ids,
                    "several devices without an adapter-local address, capabilities cannot be told apart"
                );
            }
        }

        for group in self.groups {
            group.validate()?;
            if registry.groups.contains_key(&group.id) {
                return Err(duplicate("device group", group.id.as_str()));
            }
            if registry.devices.contains_key(group.id.as_str()) {
                return Err(ConfigurationError::AmbiguousTarget(group.id.to_string()).into());
            }
            if let Some(missing) = group
                .device_ids
                .iter()
                .find(|id| !registry.devices.contains_key(*id))
            {
                return Err(ConfigurationError::UnknownGroupMember {
                    group: group.id.to_string(),
                    device: missing.to_string(),
                }
                .into());
            }
            registry.groups.insert(group.id.clone(), group);
        }

        for mapping in self.infrared {
            if registry.resolve_target(&mapping.to_device).is_none() {
                return Err(ConfigurationError::UnknownInfraredTarget {
                    key: mapping.remote_key,
                    target: mapping.to_device,
                }
                .into());
            }
            if registry.infrared.contains_key(&mapping.remote_key) {
                return Err(duplicate("infrared key", &mapping.remote_key));
            }
            registry.infrared.insert(mapping.remote_key.clone(), mapping);
        }

        tracing::debug!(
            adapters = registry.adapters.len(),
            devices = registry.devices.len(),
            groups = registry.groups.len(),
            infrared_keys = registry.infrared.len(),
            "registry built"
        );

        Ok(registry)
    }
}

fn duplicate(kind: &'static str, id: &str) -> HubError {
    ConfigurationError::DuplicateId {
        kind,
        id: id.to_string(),
    }
    .into()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use homerouter_domain::adapter::AdapterKind;
    use homerouter_domain::infrared::PowerKind;

    /// The living-room setup used across the app crate's tests.
    pub(crate) fn living_room() -> RegistryBuilder {
        Registry::builder()
            .adapter(AdapterConfig::new("harmony", AdapterKind::Harmony).unwrap())
            .adapter(AdapterConfig::new("triones", AdapterKind::Triones).unwrap())
            .device(
                Device::builder()
                    .id("c0730bb2")
                    .adapter_id("harmony")
                    .adapters_device_id("47917687")
                    .name("Amplifier")
                    .power_commands("PowerOn", "PowerOff")
                    .capabilities(Capabilities::power_only())
                    .build()
                    .unwrap(),
            )
            .device(
                Device::builder()
                    .id("d2ff0882")
                    .adapter_id("triones")
                    .adapters_device_id("AA:AA:AA:AA:AA:01")
                    .name("Sofa light")
                    .capabilities(Capabilities::rgbw_light())
                    .build()
                    .unwrap(),
            )
            .device(
                Device::builder()
                    .id("98d3cb01")
                    .adapter_id("triones")
                    .adapters_device_id("AA:AA:AA:AA:AA:02")
                    .name("Speaker light")
                    .capabilities(Capabilities::power_only())
                    .build()
                    .unwrap(),
            )
            .group(DeviceGroup::new("cfb1b27f", "Living room lights", ["d2ff0882", "98d3cb01"]).unwrap())
            .infrared(InfraredMapping::new("KEY_VOLUMEUP", "98d3cb01", PowerKind::On))
            .infrared(InfraredMapping::new("KEY_VOLUMEDOWN", "98d3cb01", PowerKind::Off))
            .infrared(InfraredMapping::new("KEY_RED", "cfb1b27f", PowerKind::On))
    }

    #[test]
    fn should_build_living_room_registry() {
        let registry = living_room().build().unwrap();
        assert_eq!(registry.devices().len(), 3);
        assert_eq!(registry.groups().len(), 1);
        assert_eq!(registry.adapters().len(), 2);
        assert_eq!(registry.infrared_len(), 3);
    }

    #[test]
    fn should_resolve_device_before_group() {
        let registry = living_room().build().unwrap();
        assert!(matches!(
            registry.resolve_target("d2ff0882"),
            Some(Target::Device(d)) if d.name == "Sofa light"
        ));
        assert!(matches!(
            registry.resolve_target("cfb1b27f"),
            Some(Target::Group(g)) if g.len() == 2
        ));
        assert!(registry.resolve_target("nope").is_none());
    }

    #[test]
    fn should_lookup_capabilities_by_local_address() {
        let registry = living_room().build().unwrap();
        let caps = registry
            .capabilities_for(&AdapterId::new("triones"), "AA:AA:AA:AA:AA:01")
            .unwrap();
        assert!(caps.color_separate_white_channel);
        assert!(
            registry
                .capabilities_for(&AdapterId::new("harmony"), "AA:AA:AA:AA:AA:01")
                .is_none()
        );
    }

    #[test]
    fn should_lookup_capabilities_of_single_unaddressed_device() {
        let registry = living_room()
            .adapter(AdapterConfig::new("particle", AdapterKind::Particle).unwrap())
            .device(
                Device::builder()
                    .id("e8b1a2c4")
                    .adapter_id("particle")
                    .name("Fan")
                    .power_commands("C21", "C20")
                    .capabilities(Capabilities::power_only())
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();

        assert_eq!(
            registry.capabilities_for(&AdapterId::new("particle"), ""),
            Some(Capabilities::power_only())
        );
    }

    #[test]
    fn should_not_guess_between_several_unaddressed_devices() {
        let fan = |id: &str| {
            Device::builder()
                .id(id)
                .adapter_id("particle")
                .name("Fan")
                .capabilities(Capabilities::power_only())
                .build()
                .unwrap()
        };
        let registry = living_room()
            .adapter(AdapterConfig::new("particle", AdapterKind::Particle).unwrap())
            .device(fan("fan-1"))
            .device(fan("fan-2"))
            .build()
            .unwrap();

        assert!(registry.capabilities_for(&AdapterId::new("particle"), "").is_none());
    }

    #[test]
    fn should_reject_group_with_unknown_member() {
        let result = living_room()
            .group(DeviceGroup::new("broken", "Broken", ["d2ff0882", "ghost"]).unwrap())
            .build();
        assert!(matches!(
            result,
            Err(HubError::Configuration(ConfigurationError::UnknownGroupMember { ref device, .. }))
                if device == "ghost"
        ));
    }

    #[test]
    fn should_reject_device_with_unknown_adapter() {
        let device = Device::builder()
            .id("x")
            .adapter_id("zigbee")
            .name("Lamp")
            .build()
            .unwrap();
        let result = living_room().device(device).build();
        assert!(matches!(
            result,
            Err(HubError::Configuration(ConfigurationError::UnknownAdapter { .. }))
        ));
    }

    #[test]
    fn should_reject_duplicate_device_id() {
        let device = Device::builder()
            .id("c0730bb2")
            .adapter_id("harmony")
            .name("Second amplifier")
            .build()
            .unwrap();
        let result = living_room().device(device).build();
        assert!(matches!(
            result,
            Err(HubError::Configuration(ConfigurationError::DuplicateId { kind: "device", .. }))
        ));
    }

    #[test]
    fn should_reject_group_id_colliding_with_device_id() {
        let result = living_room()
            .group(DeviceGroup::new("c0730bb2", "Clash", ["d2ff0882"]).unwrap())
            .build();
        assert!(matches!(
            result,
            Err(HubError::Configuration(ConfigurationError::AmbiguousTarget(_)))
        ));
    }

    #[test]
    fn should_reject_infrared_mapping_to_unknown_target() {
        let result = living_room()
            .infrared(InfraredMapping::new("KEY_MUTE", "ghost", PowerKind::Off))
            .build();
        assert!(matches!(
            result,
            Err(HubError::Configuration(ConfigurationError::UnknownInfraredTarget { .. }))
        ));
    }

    #[test]
    fn should_reject_duplicate_infrared_key() {
        let result = living_room()
            .infrared(InfraredMapping::new("KEY_VOLUMEUP", "c0730bb2", PowerKind::On))
            .build();
        assert!(matches!(
            result,
            Err(HubError::Configuration(ConfigurationError::DuplicateId { kind: "infrared key", .. }))
        ));
    }
}
