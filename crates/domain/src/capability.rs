//! Capability set — which command families a device's translator must support.

use serde::{Deserialize, Serialize};

/// Per-device capability flags.
///
/// All flags default to `false`; a device with no flags set only receives
/// the commands its adapter sends unconditionally (power).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Capabilities {
    pub power: bool,
    pub brightness: bool,
    pub color: bool,
    pub color_temperature: bool,
    /// The light has a dedicated white LED channel next to R, G and B.
    pub color_separate_white_channel: bool,
    pub playback: bool,
}

impl Capabilities {
    /// Capabilities of a plain on/off device.
    #[must_use]
    pub fn power_only() -> Self {
        Self {
            power: true,
            ..Self::default()
        }
    }

    /// Capabilities of an RGB light with a separate white channel.
    #[must_use]
    pub fn rgbw_light() -> Self {
        Self {
            power: true,
            brightness: true,
            color: true,
            color_separate_white_channel: true,
            ..Self::default()
        }
    }
}
