//! Addressing stage between the translator and a CoAP/DTLS client.

use std::fmt;

use homerouter_app::ports::Transport;
use homerouter_domain::error::HubError;

use crate::config::TradfriConfig;
use crate::request::CoapPut;

/// A fully addressed, authenticated PUT for a CoAP/DTLS client.
#[derive(Clone, PartialEq, Eq)]
pub struct GatewayPut {
    pub uri: String,
    pub identity: String,
    pub psk: String,
    /// Compact JSON body.
    pub body: String,
}

impl fmt::Debug for GatewayPut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayPut")
            .field("uri", &self.uri)
            .field("identity", &self.identity)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

/// Turns [`CoapPut`]s into [`GatewayPut`]s for one gateway and forwards
/// them to a client transport.
#[derive(Debug, Clone)]
pub struct Gateway<X> {
    config: TradfriConfig,
    inner: X,
}

impl<X> Gateway<X> {
    #[must_use]
    pub fn new(config: TradfriConfig, inner: X) -> Self {
        Self { config, inner }
    }

    #[must_use]
    pub fn address(&self, request: &CoapPut) -> GatewayPut {
        GatewayPut {
            uri: format!("{}{}", self.config.base_url(), request.path),
            identity: self.config.user.clone(),
            psk: self.config.psk.clone(),
            body: request.payload.to_string(),
        }
    }
}

impl<X: Transport<GatewayPut>> Transport<CoapPut> for Gateway<X> {
    async fn send(&self, request: CoapPut) -> Result<(), HubError> {
        let put = self.address(&request);
        self.inner.send(put).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn config() -> TradfriConfig {
        TradfriConfig {
            url: "coaps://gw:5684".to_string(),
            user: "homerouter".to_string(),
            psk: "s3cret".to_string(),
        }
    }

    #[derive(Default)]
    struct CapturedPuts(Mutex<Vec<GatewayPut>>);

    impl Transport<GatewayPut> for CapturedPuts {
        async fn send(&self, put: GatewayPut) -> Result<(), HubError> {
            self.0.lock().unwrap().push(put);
            Ok(())
        }
    }

    #[test]
    fn should_address_request_on_gateway() {
        let gateway = Gateway::new(config(), ());
        let put = gateway.address(&CoapPut::power("65537", true));
        assert_eq!(put.uri, "coaps://gw:5684/15001/65537");
        assert_eq!(put.body, r#"{"3311":[{"5850":1}]}"#);
        assert_eq!(put.identity, "homerouter");
    }

    #[test]
    fn should_hide_psk_in_debug_output() {
        let gateway = Gateway::new(config(), ());
        let put = gateway.address(&CoapPut::power("65537", true));
        assert!(!format!("{put:?}").contains("s3cret"));
    }

    #[tokio::test]
    async fn should_forward_addressed_put() {
        let puts = Arc::new(CapturedPuts::default());
        let gateway = Gateway::new(config(), Arc::clone(&puts));

        gateway.send(CoapPut::dim("65537", 127)).await.unwrap();

        let sent = puts.0.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].body, r#"{"3311":[{"5851":127}]}"#);
    }
}
