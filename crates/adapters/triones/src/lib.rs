//! # homerouter-adapter-triones
//!
//! Translator for Triones Bluetooth LE light controllers, the richest output
//! adapter.
//!
//! ## Translation rules
//!
//! | Event           | Request                                               |
//! |-----------------|-------------------------------------------------------|
//! | `PowerMsg`      | `On` / `Off`                                          |
//! | `BrightnessMsg` | re-submitted as a `ColorMsg` of the dimmed last color |
//! | `ColorMsg`      | `White` for grays on RGBW strips, `Rgb` otherwise     |
//! | anything else   | unsupported, nothing sent                             |
//!
//! RGBW strips in this deployment have their red and green channels wired
//! the other way round, so `Rgb` requests to them carry swapped channels.
//! The color remembered for later dimming is always the logical one.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `homerouter-app` and `homerouter-domain`.

mod config;
mod error;
mod frame;
mod request;

pub use config::{DEFAULT_WRITE_CHARACTERISTIC, TrionesConfig};
pub use error::TrionesError;
pub use frame::{BluetoothAddress, Frame, FrameEncoder};
pub use request::{TrionesCommand, TrionesRequest};

use homerouter_app::ports::{Translation, Translator};
use homerouter_domain::capability::Capabilities;
use homerouter_domain::color::{ChannelWiring, Rgb};
use homerouter_domain::event::{ColorMsg, OutboundEvent};

/// Outbound translator for Triones controllers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrionesTranslator;

impl TrionesTranslator {
    fn color(local_id: &str, rgb: Rgb, capabilities: &Capabilities) -> TrionesRequest {
        let command = match rgb.white_level() {
            Some(level) if capabilities.color_separate_white_channel => {
                TrionesCommand::White(level)
            }
            _ => TrionesCommand::Rgb(ChannelWiring::for_capabilities(capabilities).to_wire(rgb)),
        };
        TrionesRequest::new(local_id, command)
    }
}

impl Translator for TrionesTranslator {
    type Request = TrionesRequest;

    fn name(&self) -> &'static str {
        "triones"
    }

    fn translate(
        &self,
        event: &OutboundEvent,
        capabilities: &Capabilities,
        last_color: Rgb,
    ) -> Translation<TrionesRequest> {
        match event {
            OutboundEvent::Power(msg) => {
                let command = if msg.on {
                    TrionesCommand::On
                } else {
                    TrionesCommand::Off
                };
                Translation::send(TrionesRequest::new(&msg.device_id, command))
            }
            OutboundEvent::Brightness(msg) => {
                let base = msg.last_color.unwrap_or(last_color);
                Translation::Resubmit(
                    ColorMsg {
                        device_id: msg.device_id.clone(),
                        rgb: base.dimmed(msg.percent),
                    }
                    .into(),
                )
            }
            OutboundEvent::Color(msg) => Translation::send_color(
                Self::color(&msg.device_id, msg.rgb, capabilities),
                msg.rgb,
            ),
            OutboundEvent::ColorTemperature(_) | OutboundEvent::Playback(_) => {
                Translation::Unsupported
            }
        }
    }
}
