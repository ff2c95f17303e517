//! RGB color values and the arithmetic translators apply to them.

use serde::{Deserialize, Serialize};

use crate::capability::Capabilities;

/// An 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Rgb {
    /// Full-intensity white, the color a light is assumed to have before any
    /// color command was issued.
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// `true` when all three channels are equal (black, white and every gray).
    #[must_use]
    pub fn is_grayscale(self) -> bool {
        self.red == self.green && self.green == self.blue
    }

    /// The single channel value of a grayscale color, `None` otherwise.
    #[must_use]
    pub fn white_level(self) -> Option<u8> {
        self.is_grayscale().then_some(self.red)
    }

    /// Scale every channel by `percent` (clamped to 100), truncating.
    ///
    /// `channel * percent / 100` in integer arithmetic, so `10 @ 33%` is `3`.
    #[must_use]
    pub fn dimmed(self, percent: u8) -> Self {
        let percent = u16::from(percent.min(100));
        let scale = |channel: u8| {
            // channel * percent / 100 <= channel, so the result always fits.
            u8::try_from(u16::from(channel) * percent / 100).unwrap_or(channel)
        };
        Self::new(scale(self.red), scale(self.green), scale(self.blue))
    }

    /// The same color with the red and green channels exchanged.
    #[must_use]
    pub fn swap_red_green(self) -> Self {
        Self::new(self.green, self.red, self.blue)
    }
}

/// How a controller's output pins map onto the LED strip's color channels.
///
/// RGBW strips driven by the Bluetooth controllers in this deployment are
/// wired with red and green exchanged; every RGB value sent to them must be
/// swapped on the wire so the light shows the logical color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelWiring {
    Standard,
    RedGreenSwapped,
}

impl ChannelWiring {
    /// Wiring implied by a device's capabilities: the separate white channel
    /// flag identifies the miswired hardware class.
    #[must_use]
    pub fn for_capabilities(capabilities: &Capabilities) -> Self {
        if capabilities.color_separate_white_channel {
            Self::RedGreenSwapped
        } else {
            Self::Standard
        }
    }

    /// Map a logical color onto the wire representation.
    #[must_use]
    pub fn to_wire(self, logical: Rgb) -> Rgb {
        match self {
            Self::Standard => logical,
            Self::RedGreenSwapped => logical.swap_red_green(),
        }
    }
}
