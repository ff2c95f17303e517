//! # homerouter-adapter-tradfri
//!
//! Translator for IKEA Tradfri bulbs, reached through the gateway's CoAP
//! API. Each supported event becomes one PUT on `/15001/{device}`:
//!
//! | Event                 | Body                                   |
//! |-----------------------|----------------------------------------|
//! | `PowerMsg`            | `{"3311":[{"5850":1}]}` (or `0`)       |
//! | `BrightnessMsg`       | `{"3311":[{"5851":n}]}`, `n` in 0..=254 |
//! | `ColorTemperatureMsg` | `{"3311":[{"5709":x,"5710":y}]}`       |
//!
//! Color temperatures are snapped to the nearest of the bulbs' three white
//! points. Everything else is unsupported.

mod config;
mod error;
mod gateway;
mod request;

pub use config::TradfriConfig;
pub use error::TradfriError;
pub use gateway::{Gateway, GatewayPut};
pub use request::{CoapPut, ColorTemperature, DIMMER_MAX, dimmer_level};

use homerouter_app::ports::{Translation, Translator};
use homerouter_domain::capability::Capabilities;
use homerouter_domain::color::Rgb;
use homerouter_domain::event::OutboundEvent;

/// Outbound translator for Tradfri bulbs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TradfriTranslator;

impl Translator for TradfriTranslator {
    type Request = CoapPut;

    fn name(&self) -> &'static str {
        "tradfri"
    }

    fn translate(
        &self,
        event: &OutboundEvent,
        _capabilities: &Capabilities,
        _last_color: Rgb,
    ) -> Translation<CoapPut> {
        match event {
            OutboundEvent::Power(msg) => Translation::send(CoapPut::power(&msg.device_id, msg.on)),
            OutboundEvent::Brightness(msg) => {
                Translation::send(CoapPut::dim(&msg.device_id, dimmer_level(msg.percent)))
            }
            OutboundEvent::ColorTemperature(msg) => Translation::send(CoapPut::color_temperature(
                &msg.device_id,
                ColorTemperature::from_kelvin(msg.kelvin),
            )),
            OutboundEvent::Color(_) | OutboundEvent::Playback(_) => Translation::Unsupported,
        }
    }
}
