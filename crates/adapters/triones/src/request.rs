//! Triones controller requests and their wire payloads.
//!
//! | Command | Payload                  |
//! |---------|--------------------------|
//! | On      | `cc 23 33`               |
//! | Off     | `cc 24 33`               |
//! | Rgb     | `56 rr gg bb 00 f0 aa`   |
//! | White   | `56 00 00 00 ww 0f aa`   |

use homerouter_domain::color::Rgb;

const POWER_PREFIX: u8 = 0xcc;
const POWER_ON: u8 = 0x23;
const POWER_OFF: u8 = 0x24;
const POWER_SUFFIX: u8 = 0x33;

const COLOR_PREFIX: u8 = 0x56;
const MODE_RGB: u8 = 0xf0;
const MODE_WHITE: u8 = 0x0f;
const COLOR_SUFFIX: u8 = 0xaa;

/// What to make the controller do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrionesCommand {
    On,
    Off,
    /// Drive the RGB channels. The value is already in wire order.
    Rgb(Rgb),
    /// Drive only the dedicated white channel.
    White(u8),
}

impl TrionesCommand {
    /// Encode the command payload written to the controller.
    #[must_use]
    pub fn payload(self) -> Vec<u8> {
        match self {
            Self::On => vec![POWER_PREFIX, POWER_ON, POWER_SUFFIX],
            Self::Off => vec![POWER_PREFIX, POWER_OFF, POWER_SUFFIX],
            Self::Rgb(rgb) => vec![
                COLOR_PREFIX,
                rgb.red,
                rgb.green,
                rgb.blue,
                0x00,
                MODE_RGB,
                COLOR_SUFFIX,
            ],
            Self::White(level) => vec![
                COLOR_PREFIX,
                0x00,
                0x00,
                0x00,
                level,
                MODE_WHITE,
                COLOR_SUFFIX,
            ],
        }
    }
}

/// A command addressed to one controller by its Bluetooth address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrionesRequest {
    pub address: String,
    pub command: TrionesCommand,
}

impl TrionesRequest {
    #[must_use]
    pub fn new(address: impl Into<String>, command: TrionesCommand) -> Self {
        Self {
            address: address.into(),
            command,
        }
    }
}
