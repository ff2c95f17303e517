//! Device group — a named set of devices targeted as one by power intents.

use serde::{Deserialize, Serialize};

use crate::error::{HubError, ValidationError};
use crate::id::{DeviceGroupId, DeviceId};

/// A named, ordered set of device ids.
///
/// Member order only affects the order commands are issued in. A group may
/// be empty; switching it issues no commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceGroup {
    pub id: DeviceGroupId,
    pub name: String,
    pub device_ids: Vec<DeviceId>,
}

impl DeviceGroup {
    /// Create a group after validating its invariants.
    ///
    /// Membership is *not* checked against known devices here; that is the
    /// registry's job once all devices are known.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] when the id or name is empty.
    pub fn new(
        id: impl Into<DeviceGroupId>,
        name: impl Into<String>,
        device_ids: impl IntoIterator<Item = impl Into<DeviceId>>,
    ) -> Result<Self, HubError> {
        let group = Self {
            id: id.into(),
            name: name.into(),
            device_ids: device_ids.into_iter().map(Into::into).collect(),
        };
        group.validate()?;
        Ok(group)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] when the id or name is empty.
    pub fn validate(&self) -> Result<(), HubError> {
        if self.id.is_empty() {
            return Err(ValidationError::EmptyId("device group").into());
        }
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.device_ids.len()
    }

    /// Whether the group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.device_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_create_group_with_members_in_order() {
        let group = DeviceGroup::new("cfb1b27f", "Living room lights", ["d2ff0882", "98d3cb01"])
            .unwrap();
        assert_eq!(group.len(), 2);
        assert_eq!(group.device_ids[0].as_str(), "d2ff0882");
        assert_eq!(group.device_ids[1].as_str(), "98d3cb01");
    }

    #[test]
    fn should_accept_empty_group() {
        let group = DeviceGroup::new("g", "Empty", Vec::<String>::new()).unwrap();
        assert!(group.is_empty());
    }

    #[test]
    fn should_reject_empty_name() {
        let result = DeviceGroup::new("g", "", ["a"]);
        assert!(matches!(
            result,
            Err(HubError::Validation(ValidationError::EmptyName))
        ));
    }
}
