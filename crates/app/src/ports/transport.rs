//! Transport port — delivers protocol requests to hardware or a cloud API.

use std::future::Future;

use homerouter_domain::error::HubError;

/// Sends one request of type `R`.
///
/// Concrete transports (Bluetooth LE, CoAP/DTLS, hub sessions) live outside
/// the core. The adapter worker wraps every call in a timeout and never
/// retries; whatever error is returned is logged and dropped.
pub trait Transport<R>: Send + Sync + 'static {
    fn send(&self, request: R) -> impl Future<Output = Result<(), HubError>> + Send;
}

impl<R, T: Transport<R>> Transport<R> for std::sync::Arc<T> {
    fn send(&self, request: R) -> impl Future<Output = Result<(), HubError>> + Send {
        (**self).send(request)
    }
}
