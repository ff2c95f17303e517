//! Translator for adapters that take named commands (IR hubs, cloud
//! functions, simple plugs).
//!
//! Power events carry the device's configured command token (`PowerOn`,
//! `C21`, …) which is forwarded as is; devices without tokens get `on` or
//! `off`. Playback controls are forwarded by name. Everything else is
//! unsupported.

use homerouter_domain::capability::Capabilities;
use homerouter_domain::color::Rgb;
use homerouter_domain::event::{OutboundEvent, PlaybackAction};

use crate::ports::{Translation, Translator};

/// A named command for one adapter-local device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceCommand {
    pub device_id: String,
    pub command: String,
}

/// Translator for command-token adapters.
#[derive(Debug, Clone, Copy)]
pub struct CommandTranslator {
    name: &'static str,
}

impl CommandTranslator {
    /// `name` is the adapter kind shown in logs.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

fn playback_command(action: PlaybackAction) -> &'static str {
    match action {
        PlaybackAction::Play => "play",
        PlaybackAction::Pause => "pause",
        PlaybackAction::Stop => "stop",
        PlaybackAction::Next => "next",
        PlaybackAction::Previous => "previous",
    }
}

impl Translator for CommandTranslator {
    type Request = DeviceCommand;

    fn name(&self) -> &'static str {
        self.name
    }

    fn translate(
        &self,
        event: &OutboundEvent,
        _capabilities: &Capabilities,
        _last_color: Rgb,
    ) -> Translation<DeviceCommand> {
        let (device_id, command) = match event {
            OutboundEvent::Power(msg) => {
                let fallback = if msg.on { "on" } else { "off" };
                let command = msg.command.as_deref().unwrap_or(fallback);
                (&msg.device_id, command)
            }
            OutboundEvent::Playback(msg) => (&msg.device_id, playback_command(msg.action)),
            _ => return Translation::Unsupported,
        };
        Translation::send(DeviceCommand {
            device_id: device_id.clone(),
            command: command.to_string(),
        })
    }
}
