//! # homerouter-adapter-happylights
//!
//! Translator for HappyLights Bluetooth RGB bulbs, driven through a bridge
//! that accepts one light request per call.
//!
//! | Event         | Request          |
//! |---------------|------------------|
//! | `PowerMsg`    | `On` / `Off`     |
//! | `ColorMsg`    | `Color(r, g, b)` |
//! | anything else | unsupported      |
//!
//! These bulbs have no separate white channel: colors go out exactly as
//! commanded.

use homerouter_app::ports::{Translation, Translator};
use homerouter_domain::capability::Capabilities;
use homerouter_domain::color::Rgb;
use homerouter_domain::event::OutboundEvent;

/// What to do with one bulb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightCommand {
    On,
    Off,
    Color(Rgb),
}

/// A light request addressed by the bulb's Bluetooth address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightRequest {
    pub address: String,
    pub command: LightCommand,
}

impl LightRequest {
    #[must_use]
    pub fn new(address: impl Into<String>, command: LightCommand) -> Self {
        Self {
            address: address.into(),
            command,
        }
    }
}

/// Outbound translator for HappyLights bulbs.
#[derive(Debug, Clone, Copy, Default)]
pub struct HappyLightsTranslator;

impl Translator for HappyLightsTranslator {
    type Request = LightRequest;

    fn name(&self) -> &'static str {
        "happylights"
    }

    fn translate(
        &self,
        event: &OutboundEvent,
        _capabilities: &Capabilities,
        _last_color: Rgb,
    ) -> Translation<LightRequest> {
        match event {
            OutboundEvent::Power(msg) => {
                let command = if msg.on { LightCommand::On } else { LightCommand::Off };
                Translation::send(LightRequest::new(&msg.device_id, command))
            }
            OutboundEvent::Color(msg) => Translation::send_color(
                LightRequest::new(&msg.device_id, LightCommand::Color(msg.rgb)),
                msg.rgb,
            ),
            OutboundEvent::Brightness(_)
            | OutboundEvent::ColorTemperature(_)
            | OutboundEvent::Playback(_) => Translation::Unsupported,
        }
    }
}
