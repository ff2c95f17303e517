//! Startup device catalog: one log line per addressable device or group.
//!
//! This is the list a voice assistant would be synced with, so groups are
//! listed alongside devices with a generated description.

use homerouter_app::registry::Registry;

/// One catalog line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Devices then groups, each sorted by id.
#[must_use]
pub fn entries(registry: &Registry) -> Vec<CatalogEntry> {
    let devices = registry.devices().into_iter().map(|device| CatalogEntry {
        id: device.id.to_string(),
        name: device.name.clone(),
        description: device.description.clone(),
    });
    let groups = registry.groups().into_iter().map(|group| CatalogEntry {
        id: group.id.to_string(),
        name: group.name.clone(),
        description: format!("Device group: {}", group.name),
    });
    devices.chain(groups).collect()
}

pub fn log(registry: &Registry) {
    for entry in entries(registry) {
        tracing::info!(
            id = %entry.id,
            name = %entry.name,
            description = %entry.description,
            "catalog entry"
        );
    }
    tracing::info!(
        adapters = registry.adapters().len(),
        devices = registry.devices().len(),
        groups = registry.groups().len(),
        infrared_keys = registry.infrared_len(),
        "device tables loaded"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use homerouter_domain::adapter::{AdapterConfig, AdapterKind};
    use homerouter_domain::device::Device;
    use homerouter_domain::device_group::DeviceGroup;

    #[test]
    fn should_list_devices_then_groups() {
        let registry = Registry::builder()
            .adapter(AdapterConfig::new("particle", AdapterKind::Particle).unwrap())
            .device(
                Device::builder()
                    .id("d2ff0882")
                    .adapter_id("particle")
                    .name("Sofa light")
                    .description("Floor light next the sofa")
                    .build()
                    .unwrap(),
            )
            .group(DeviceGroup::new("cfb1b27f", "Living room lights", ["d2ff0882"]).unwrap())
            .build()
            .unwrap();

        let entries = entries(&registry);

        assert_eq!(
            entries,
            vec![
                CatalogEntry {
                    id: "d2ff0882".to_string(),
                    name: "Sofa light".to_string(),
                    description: "Floor light next the sofa".to_string(),
                },
                CatalogEntry {
                    id: "cfb1b27f".to_string(),
                    name: "Living room lights".to_string(),
                    description: "Device group: Living room lights".to_string(),
                },
            ]
        );
    }
}
