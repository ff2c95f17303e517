//! Tradfri gateway settings.

use std::fmt;

use serde::Deserialize;

use crate::error::TradfriError;

/// Settings read from the adapter's `settings` table.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct TradfriConfig {
    /// Gateway base URL, e.g. `coaps://192.168.1.2:5684`.
    pub url: String,
    /// DTLS identity registered with the gateway.
    pub user: String,
    /// Pre-shared key for `user`.
    pub psk: String,
}

impl fmt::Debug for TradfriConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TradfriConfig")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("psk", &"<redacted>")
            .finish()
    }
}

impl TradfriConfig {
    /// Decode and validate an adapter's opaque settings.
    ///
    /// # Errors
    ///
    /// Returns [`TradfriError::Settings`] when the blob has the wrong shape,
    /// or a validation error from [`TradfriConfig::validate`].
    pub fn from_settings(settings: &serde_json::Value) -> Result<Self, TradfriError> {
        let config = if settings.is_null() {
            Self::default()
        } else {
            Self::deserialize(settings)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the gateway can be addressed and authenticated against.
    ///
    /// # Errors
    ///
    /// Returns [`TradfriError::InvalidUrl`] or
    /// [`TradfriError::MissingCredential`].
    pub fn validate(&self) -> Result<(), TradfriError> {
        let host = self.url.strip_prefix("coaps://").unwrap_or_default();
        if host.is_empty() {
            return Err(TradfriError::InvalidUrl(self.url.clone()));
        }
        if self.user.is_empty() {
            return Err(TradfriError::MissingCredential("user"));
        }
        if self.psk.is_empty() {
            return Err(TradfriError::MissingCredential("psk"));
        }
        Ok(())
    }

    /// Gateway URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> serde_json::Value {
        serde_json::json!({
            "url": "coaps://192.168.1.2:5684/",
            "user": "homerouter",
            "psk": "s3cret",
        })
    }

    #[test]
    fn should_read_gateway_settings() {
        let config = TradfriConfig::from_settings(&settings()).unwrap();
        assert_eq!(config.base_url(), "coaps://192.168.1.2:5684");
        assert_eq!(config.user, "homerouter");
    }

    #[test]
    fn should_redact_psk_in_debug_output() {
        let config = TradfriConfig::from_settings(&settings()).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn should_reject_non_coaps_url() {
        let mut settings = settings();
        settings["url"] = "http://192.168.1.2".into();
        assert!(matches!(
            TradfriConfig::from_settings(&settings),
            Err(TradfriError::InvalidUrl(_))
        ));
    }

    #[test]
    fn should_require_psk() {
        let mut settings = settings();
        settings["psk"] = "".into();
        assert!(matches!(
            TradfriConfig::from_settings(&settings),
            Err(TradfriError::MissingCredential("psk"))
        ));
    }

    #[test]
    fn should_reject_missing_settings() {
        assert!(matches!(
            TradfriConfig::from_settings(&serde_json::Value::Null),
            Err(TradfriError::InvalidUrl(_))
        ));
    }
}
