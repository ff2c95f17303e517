//! CoAP requests understood by the Tradfri gateway.

use serde_json::{Value, json};

/// Resource collection holding the gateway's devices.
const DEVICES_PATH: &str = "/15001";

/// Light control array on a device resource.
const LIGHT_CONTROL: &str = "3311";
const ON_OFF: &str = "5850";
const DIMMER: &str = "5851";
const COLOR_X: &str = "5709";
const COLOR_Y: &str = "5710";

/// Highest value the gateway's dimmer accepts.
pub const DIMMER_MAX: u8 = 254;

/// A PUT to a gateway resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoapPut {
    /// Resource path, relative to the gateway URL.
    pub path: String,
    pub payload: Value,
}

impl CoapPut {
    fn light(device_id: &str, control: Value) -> Self {
        Self {
            path: format!("{DEVICES_PATH}/{device_id}"),
            payload: json!({ LIGHT_CONTROL: [control] }),
        }
    }

    #[must_use]
    pub fn power(device_id: &str, on: bool) -> Self {
        Self::light(device_id, json!({ ON_OFF: u8::from(on) }))
    }

    /// Dim without fading. `level` is `0..=254`.
    #[must_use]
    pub fn dim(device_id: &str, level: u8) -> Self {
        Self::light(device_id, json!({ DIMMER: level.min(DIMMER_MAX) }))
    }

    #[must_use]
    pub fn color_temperature(device_id: &str, temperature: ColorTemperature) -> Self {
        let (x, y) = temperature.xy();
        Self::light(device_id, json!({ COLOR_X: x, COLOR_Y: y }))
    }
}

/// The three white points white-spectrum bulbs support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTemperature {
    Warm,
    Normal,
    Cold,
}

impl ColorTemperature {
    /// Nearest supported white point for a temperature in kelvin.
    #[must_use]
    pub fn from_kelvin(kelvin: u16) -> Self {
        match kelvin {
            0..=3000 => Self::Warm,
            3001..=4500 => Self::Normal,
            _ => Self::Cold,
        }
    }

    /// CIE xy coordinates in gateway units.
    #[must_use]
    pub fn xy(self) -> (u16, u16) {
        match self {
            Self::Warm => (33135, 27211),
            Self::Normal => (30140, 26909),
            Self::Cold => (24930, 24684),
        }
    }
}

/// Map a brightness percentage onto the gateway's dimmer range, truncating.
#[must_use]
pub fn dimmer_level(percent: u8) -> u8 {
    let level = u16::from(percent.min(100)) * u16::from(DIMMER_MAX) / 100;
    u8::try_from(level).unwrap_or(DIMMER_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_address_device_resource() {
        let put = CoapPut::power("65537", true);
        assert_eq!(put.path, "/15001/65537");
        assert_eq!(put.payload, json!({ "3311": [{ "5850": 1 }] }));
    }

    #[test]
    fn should_encode_power_off() {
        let put = CoapPut::power("65537", false);
        assert_eq!(put.payload.to_string(), r#"{"3311":[{"5850":0}]}"#);
    }

    #[test]
    fn should_encode_color_temperature() {
        let put = CoapPut::color_temperature("65537", ColorTemperature::Warm);
        assert_eq!(put.payload, json!({ "3311": [{ "5709": 33135, "5710": 27211 }] }));
    }

    #[test]
    fn should_bucket_kelvin() {
        assert_eq!(ColorTemperature::from_kelvin(2200), ColorTemperature::Warm);
        assert_eq!(ColorTemperature::from_kelvin(3000), ColorTemperature::Warm);
        assert_eq!(ColorTemperature::from_kelvin(3001), ColorTemperature::Normal);
        assert_eq!(ColorTemperature::from_kelvin(4500), ColorTemperature::Normal);
        assert_eq!(ColorTemperature::from_kelvin(6500), ColorTemperature::Cold);
    }

    #[test]
    fn should_scale_percent_to_dimmer_range() {
        assert_eq!(dimmer_level(0), 0);
        assert_eq!(dimmer_level(50), 127);
        assert_eq!(dimmer_level(100), 254);
        assert_eq!(dimmer_level(200), 254);
    }
}
