//! Event taxonomy — the adapter-agnostic vocabulary of the router.
//!
//! Inbound events are intents arriving from input sources (remotes, cloud
//! queues, simulators). Outbound events are commands leaving toward
//! hardware, addressed by the adapter-local device id.
//!
//! ```text
//! symmetric (same shape both ways)    asymmetric
//! ---------------------------------   -----------------------------------
//! PlaybackEvent / PlaybackMsg         PowerEvent      -> PowerMsg
//!                                     InfraredEvent   -> (power intent)
//!                                     brightness      -> BrightnessMsg
//! ```

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::id::DeviceId;

/// Playback transport controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackAction {
    Play,
    Pause,
    Stop,
    Next,
    Previous,
}

// ---------------------------------------------------------------------------
// Inbound
// ---------------------------------------------------------------------------

/// Turn a device or every member of a device group on or off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerEvent {
    /// A device id or a device group id.
    pub target_id: String,
    pub on: bool,
}

impl PowerEvent {
    #[must_use]
    pub fn new(target_id: impl Into<String>, on: bool) -> Self {
        Self {
            target_id: target_id.into(),
            on,
        }
    }
}

/// A remote-control key press, e.g. `KEY_VOLUMEUP`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfraredEvent {
    pub key: String,
}

impl InfraredEvent {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// A person arrived or left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceChangeEvent {
    pub person_id: String,
    pub present: bool,
}

/// A playback control request for a media device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackEvent {
    pub device_id: DeviceId,
    pub action: PlaybackAction,
}

/// Anything an input source can produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundEvent {
    Power(PowerEvent),
    Infrared(InfraredEvent),
    PresenceChange(PresenceChangeEvent),
    Playback(PlaybackEvent),
}

impl InboundEvent {
    /// Stable name of the event type, used in logs.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Power(_) => "PowerEvent",
            Self::Infrared(_) => "InfraredEvent",
            Self::PresenceChange(_) => "PresenceChangeEvent",
            Self::Playback(_) => "PlaybackEvent",
        }
    }
}

// ---------------------------------------------------------------------------
// Outbound
// ---------------------------------------------------------------------------

/// Turn a single device on or off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerMsg {
    /// Adapter-local address.
    pub device_id: String,
    pub on: bool,
    /// Adapter-specific command token (`PowerOn`, `C21`, …), when configured.
    pub command: Option<String>,
}

/// Set a light to an exact color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorMsg {
    pub device_id: String,
    pub rgb: Rgb,
}

/// Dim a light to a percentage of its last color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrightnessMsg {
    pub device_id: String,
    /// `0..=100`.
    pub percent: u8,
    /// Color to dim from. `None` means the color the adapter last commanded
    /// for this device.
    pub last_color: Option<Rgb>,
}

/// Set a white-spectrum light's color temperature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTemperatureMsg {
    pub device_id: String,
    pub kelvin: u16,
}

/// Forward a playback control to a media device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackMsg {
    pub device_id: String,
    pub action: PlaybackAction,
}

/// Everything that can travel through an adapter's outbound queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundEvent {
    Power(PowerMsg),
    Color(ColorMsg),
    Brightness(BrightnessMsg),
    ColorTemperature(ColorTemperatureMsg),
    Playback(PlaybackMsg),
}

impl OutboundEvent {
    /// Stable name of the event type, used in unsupported-event warnings.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Power(_) => "PowerMsg",
            Self::Color(_) => "ColorMsg",
            Self::Brightness(_) => "BrightnessMsg",
            Self::ColorTemperature(_) => "ColorTemperatureMsg",
            Self::Playback(_) => "PlaybackMsg",
        }
    }

    /// Adapter-local address of the target device.
    #[must_use]
    pub fn device_id(&self) -> &str {
        match self {
            Self::Power(m) => &m.device_id,
            Self::Color(m) => &m.device_id,
            Self::Brightness(m) => &m.device_id,
            Self::ColorTemperature(m) => &m.device_id,
            Self::Playback(m) => &m.device_id,
        }
    }
}

impl From<PowerMsg> for OutboundEvent {
    fn from(msg: PowerMsg) -> Self {
        Self::Power(msg)
    }
}

impl From<ColorMsg> for OutboundEvent {
    fn from(msg: ColorMsg) -> Self {
        Self::Color(msg)
    }
}

impl From<BrightnessMsg> for OutboundEvent {
    fn from(msg: BrightnessMsg) -> Self {
        Self::Brightness(msg)
    }
}

impl From<ColorTemperatureMsg> for OutboundEvent {
    fn from(msg: ColorTemperatureMsg) -> Self {
        Self::ColorTemperature(msg)
    }
}

impl From<PlaybackMsg> for OutboundEvent {
    fn from(msg: PlaybackMsg) -> Self {
        Self::Playback(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_name_outbound_event_types() {
        let event: OutboundEvent = ColorMsg {
            device_id: "AA:BB".to_string(),
            rgb: Rgb::WHITE,
        }
        .into();
        assert_eq!(event.event_type(), "ColorMsg");
        assert_eq!(event.device_id(), "AA:BB");
    }

    #[test]
    fn should_name_inbound_event_types() {
        let event = InboundEvent::Infrared(InfraredEvent::new("KEY_POWER"));
        assert_eq!(event.event_type(), "InfraredEvent");
    }

    #[test]
    fn should_deserialize_tagged_inbound_event() {
        let json = r#"{"type":"power","target_id":"cfb1b27f","on":true}"#;
        let event: InboundEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event, InboundEvent::Power(PowerEvent::new("cfb1b27f", true)));
    }

    #[test]
    fn should_deserialize_brightness_without_last_color() {
        let json = r#"{"type":"brightness","device_id":"x","percent":40,"last_color":null}"#;
        let event: OutboundEvent = serde_json::from_str(json).unwrap();
        assert!(matches!(
            event,
            OutboundEvent::Brightness(BrightnessMsg {
                percent: 40,
                last_color: None,
                ..
            })
        ));
    }
}
