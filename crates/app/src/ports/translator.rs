//! Translator port — generic outbound events to protocol requests.

use homerouter_domain::capability::Capabilities;
use homerouter_domain::color::Rgb;
use homerouter_domain::event::OutboundEvent;

/// Outcome of translating one outbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation<R> {
    /// Send `request` to the device.
    Send {
        request: R,
        /// The logical color this request puts the device in, if any. The
        /// worker remembers it for later brightness derivations.
        commanded_color: Option<Rgb>,
    },
    /// Feed a derived event back into the same adapter's pipeline instead
    /// of talking to hardware.
    Resubmit(OutboundEvent),
    /// The adapter has no rule for this event.
    Unsupported,
}

impl<R> Translation<R> {
    /// A request that does not change the device's color.
    pub fn send(request: R) -> Self {
        Self::Send {
            request,
            commanded_color: None,
        }
    }

    /// A request that puts the device in `color`.
    pub fn send_color(request: R, color: Rgb) -> Self {
        Self::Send {
            request,
            commanded_color: Some(color),
        }
    }
}

/// Turns generic outbound events into one device family's requests.
///
/// Implementations are pure: everything they depend on is passed in, and
/// the adapter worker owns the state (`last_color`) and performs the IO.
pub trait Translator: Send + Sync + 'static {
    /// The protocol request type handed to the adapter's transport.
    type Request: std::fmt::Debug + Send + 'static;

    /// Short adapter-kind name used in logs (e.g. `"triones"`).
    fn name(&self) -> &'static str;

    /// Translate one event for a device with `capabilities` whose last
    /// commanded color is `last_color`.
    fn translate(
        &self,
        event: &OutboundEvent,
        capabilities: &Capabilities,
        last_color: Rgb,
    ) -> Translation<Self::Request>;
}
