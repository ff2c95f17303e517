//! GATT write frames and the transport stage that produces them.

use std::fmt;

use homerouter_app::ports::Transport;
use homerouter_domain::error::HubError;

use crate::config::TrionesConfig;
use crate::error::TrionesError;
use crate::request::TrionesRequest;

/// A 48-bit Bluetooth device address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BluetoothAddress([u8; 6]);

impl BluetoothAddress {
    /// Parse the colon-separated form, e.g. `AA:BB:CC:DD:EE:FF`.
    ///
    /// # Errors
    ///
    /// Returns [`TrionesError::InvalidAddress`] for anything else.
    pub fn parse(input: &str) -> Result<Self, TrionesError> {
        let invalid = || TrionesError::InvalidAddress(input.to_string());
        let mut bytes = [0_u8; 6];
        let mut parts = input.split(':');
        for byte in &mut bytes {
            let part = parts.next().ok_or_else(invalid)?;
            if part.len() != 2 {
                return Err(invalid());
            }
            *byte = u8::from_str_radix(part, 16).map_err(|_| invalid())?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self(bytes))
    }

    #[must_use]
    pub fn octets(self) -> [u8; 6] {
        self.0
    }
}

impl fmt::Display for BluetoothAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

impl fmt::Debug for BluetoothAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// One characteristic write, ready for a Bluetooth LE client.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    pub address: BluetoothAddress,
    pub characteristic: String,
    pub payload: Vec<u8>,
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({} {} [", self.address, self.characteristic)?;
        for (idx, byte) in self.payload.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{byte:02x}")?;
        }
        f.write_str("])")
    }
}

/// Encodes [`TrionesRequest`]s into [`Frame`]s and hands them to a frame
/// transport.
#[derive(Debug, Clone)]
pub struct FrameEncoder<X> {
    config: TrionesConfig,
    inner: X,
}

impl<X> FrameEncoder<X> {
    #[must_use]
    pub fn new(config: TrionesConfig, inner: X) -> Self {
        Self { config, inner }
    }

    /// Build the frame for a request.
    ///
    /// # Errors
    ///
    /// Returns [`TrionesError::InvalidAddress`] when the request is not
    /// addressed to a Bluetooth address.
    pub fn encode(&self, request: &TrionesRequest) -> Result<Frame, TrionesError> {
        Ok(Frame {
            address: BluetoothAddress::parse(&request.address)?,
            characteristic: self.config.write_characteristic.clone(),
            payload: request.command.payload(),
        })
    }
}

impl<X: Transport<Frame>> Transport<TrionesRequest> for FrameEncoder<X> {
    async fn send(&self, request: TrionesRequest) -> Result<(), HubError> {
        let frame = self.encode(&request)?;
        self.inner.send(frame).await
    }
}
