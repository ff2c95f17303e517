//! Advisory on/off state, private to the dispatcher.
//!
//! Every entry reflects the last power command the dispatcher *issued*, not
//! anything a device reported. A device switched by hand, or one that missed
//! a command, is recorded wrongly until the next command reaches it. Only
//! the dispatcher's group policies read this; nothing else may treat it as
//! the state of the house.

use std::collections::HashMap;

use homerouter_domain::id::DeviceId;

#[derive(Debug, Default)]
pub(crate) struct PowerStateBook {
    probably_turned_on: HashMap<DeviceId, bool>,
}

impl PowerStateBook {
    /// Devices never commanded are assumed off.
    pub(crate) fn probably_turned_on(&self, device_id: &DeviceId) -> bool {
        self.probably_turned_on
            .get(device_id)
            .copied()
            .unwrap_or(false)
    }

    pub(crate) fn record(&mut self, device_id: &DeviceId, on: bool) {
        self.probably_turned_on.insert(device_id.clone(), on);
    }
}
