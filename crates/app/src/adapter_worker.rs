//! Adapter worker — the per-adapter loop behind every outbound queue.
//!
//! The worker takes events off its queue in order, asks the adapter's
//! [`Translator`] what to do with each, and hands requests to the adapter's
//! [`Transport`] under a deadline. Delivery is at most once: failures and
//! timeouts are logged and the worker moves on to the next event. Nothing
//! is ever reported back to the dispatcher.
//!
//! Events a translator derives from another one (brightness → color) are
//! re-submitted into this worker's own pipeline. They are kept in a local
//! backlog that is processed before the next queue receive, so a worker
//! never waits on space in the queue it is itself responsible for draining.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use homerouter_domain::capability::Capabilities;
use homerouter_domain::color::Rgb;
use homerouter_domain::error::HubError;
use homerouter_domain::event::OutboundEvent;
use homerouter_domain::id::AdapterId;

use crate::color_memory::ColorMemory;
use crate::ports::{Translation, Translator, Transport};
use crate::registry::Registry;

/// Deadline for a single request to an adapter's transport.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Drains one adapter's outbound queue.
pub struct AdapterWorker<T, X> {
    adapter_id: AdapterId,
    translator: T,
    transport: X,
    registry: Arc<Registry>,
    request_timeout: Duration,
    colors: ColorMemory,
    backlog: VecDeque<OutboundEvent>,
}

impl<T, X> AdapterWorker<T, X>
where
    T: Translator,
    X: Transport<T::Request>,
{
    #[must_use]
    pub fn new(adapter_id: AdapterId, translator: T, transport: X, registry: Arc<Registry>) -> Self {
        Self {
            adapter_id,
            translator,
            transport,
            registry,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            colors: ColorMemory::default(),
            backlog: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Spawn the worker loop on the current runtime.
    pub fn spawn(
        self,
        queue: mpsc::Receiver<OutboundEvent>,
        stop: CancellationToken,
    ) -> JoinHandle<()> {
        tokio::spawn(self.run(queue, stop))
    }

    /// Process events until stopped or the queue closes.
    ///
    /// Events still queued when `stop` fires are abandoned.
    pub async fn run(mut self, mut queue: mpsc::Receiver<OutboundEvent>, stop: CancellationToken) {
        tracing::info!(adapter = %self.adapter_id, kind = self.translator.name(), "adapter started");

        loop {
            let event = if let Some(event) = self.backlog.pop_front() {
                event
            } else {
                tokio::select! {
                    biased;
                    () = stop.cancelled() => break,
                    next = queue.recv() => match next {
                        Some(event) => event,
                        None => break,
                    },
                }
            };

            if stop.is_cancelled() {
                break;
            }

            self.process(event).await;
        }

        tracing::info!(adapter = %self.adapter_id, "adapter stopped");
    }

    /// Translate one event and deliver the resulting request, if any.
    ///
    /// Derived events are queued on the local backlog, not processed here.
    pub async fn process(&mut self, event: OutboundEvent) {
        let Some(request) = self.translate(&event) else {
            return;
        };
        if let Err(err) = self.deliver(request).await {
            tracing::error!(
                adapter = %self.adapter_id,
                event_type = event.event_type(),
                device = event.device_id(),
                error = %err,
                "request failed, dropped"
            );
        }
    }

    /// Process an event and everything it derives, without touching the
    /// queue.
    pub async fn process_all(&mut self, event: OutboundEvent) {
        self.process(event).await;
        while let Some(derived) = self.backlog.pop_front() {
            self.process(derived).await;
        }
    }

    /// The color this worker last commanded for an adapter-local device.
    #[must_use]
    pub fn last_color(&self, local_id: &str) -> Rgb {
        self.colors.last_color(local_id)
    }

    fn translate(&mut self, event: &OutboundEvent) -> Option<T::Request> {
        let local_id = event.device_id();
        let capabilities = self.capabilities(local_id);
        let last_color = self.colors.last_color(local_id);

        match self.translator.translate(event, &capabilities, last_color) {
            Translation::Send {
                request,
                commanded_color,
            } => {
                if let Some(color) = commanded_color {
                    self.colors.remember(local_id, color);
                }
                Some(request)
            }
            Translation::Resubmit(derived) => {
                tracing::debug!(
                    adapter = %self.adapter_id,
                    from = event.event_type(),
                    to = derived.event_type(),
                    "re-submitting derived event"
                );
                self.backlog.push_back(derived);
                None
            }
            Translation::Unsupported => {
                tracing::warn!(
                    adapter = %self.adapter_id,
                    kind = self.translator.name(),
                    event_type = event.event_type(),
                    "unsupported outbound event"
                );
                None
            }
        }
    }

    fn capabilities(&self, local_id: &str) -> Capabilities {
        self.registry
            .capabilities_for(&self.adapter_id, local_id)
            .unwrap_or_else(|| {
                if local_id.is_empty() {
                    tracing::debug!(
                        adapter = %self.adapter_id,
                        "no single unaddressed device for adapter, assuming no capabilities"
                    );
                } else {
                    tracing::warn!(
                        adapter = %self.adapter_id,
                        device = local_id,
                        "no registered device for adapter address, assuming no capabilities"
                    );
                }
                Capabilities::default()
            })
    }

    async fn deliver(&self, request: T::Request) -> Result<(), HubError> {
        tracing::debug!(adapter = %self.adapter_id, ?request, "sending request");
        tokio::time::timeout(self.request_timeout, self.transport.send(request))
            .await
            .map_err(|_| HubError::Timeout(self.request_timeout))?
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use homerouter_domain::adapter::{AdapterConfig, AdapterKind};
    use homerouter_domain::device::Device;
    use homerouter_domain::event::{BrightnessMsg, ColorMsg, PlaybackAction, PlaybackMsg, PowerMsg};

    use crate::outbound::outbound_queue;
    use crate::registry::tests::living_room;

    /// Minimal translator: power and color pass through, brightness derives
    /// a color, playback is unsupported.
    struct EchoTranslator;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum EchoRequest {
        Power(String, bool),
        Color(String, Rgb),
    }

    impl Translator for EchoTranslator {
        type Request = EchoRequest;

        fn name(&self) -> &'static str {
            "echo"
        }

        fn translate(
            &self,
            event: &OutboundEvent,
            _capabilities: &Capabilities,
            last_color: Rgb,
        ) -> Translation<EchoRequest> {
            match event {
                OutboundEvent::Power(m) => Translation::send(EchoRequest::Power(m.device_id.clone(), m.on)),
                OutboundEvent::Color(m) => {
                    Translation::send_color(EchoRequest::Color(m.device_id.clone(), m.rgb), m.rgb)
                }
                OutboundEvent::Brightness(m) => Translation::Resubmit(
                    ColorMsg {
                        device_id: m.device_id.clone(),
                        rgb: m.last_color.unwrap_or(last_color).dimmed(m.percent),
                    }
                    .into(),
                ),
                _ => Translation::Unsupported,
            }
        }
    }

    /// Sends power commands only to devices registered with power capability.
    struct PowerOnlyTranslator;

    impl Translator for PowerOnlyTranslator {
        type Request = EchoRequest;

        fn name(&self) -> &'static str {
            "power-only"
        }

        fn translate(
            &self,
            event: &OutboundEvent,
            capabilities: &Capabilities,
            _last_color: Rgb,
        ) -> Translation<EchoRequest> {
            match event {
                OutboundEvent::Power(m) if capabilities.power => {
                    Translation::send(EchoRequest::Power(m.device_id.clone(), m.on))
                }
                _ => Translation::Unsupported,
            }
        }
    }

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<EchoRequest>>,
        fail: bool,
    }

    impl RecordingTransport {
        fn sent(&self) -> Vec<EchoRequest> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Transport<EchoRequest> for RecordingTransport {
        async fn send(&self, request: EchoRequest) -> Result<(), HubError> {
            self.sent.lock().unwrap().push(request);
            if self.fail {
                return Err(HubError::Transport("link down".into()));
            }
            Ok(())
        }
    }

    struct StalledTransport;

    impl Transport<EchoRequest> for StalledTransport {
        async fn send(&self, _request: EchoRequest) -> Result<(), HubError> {
            std::future::pending::<()>().await;
            Ok(())
        }
    }

    const SOFA: &str = "AA:AA:AA:AA:AA:01";

    fn worker<X: Transport<EchoRequest>>(transport: X) -> AdapterWorker<EchoTranslator, X> {
        let registry = Arc::new(living_room().build().unwrap());
        AdapterWorker::new(AdapterId::new("triones"), EchoTranslator, transport, registry)
    }

    fn color(rgb: Rgb) -> OutboundEvent {
        ColorMsg {
            device_id: SOFA.to_string(),
            rgb,
        }
        .into()
    }

    fn brightness(percent: u8) -> OutboundEvent {
        BrightnessMsg {
            device_id: SOFA.to_string(),
            percent,
            last_color: None,
        }
        .into()
    }

    #[tokio::test]
    async fn should_remember_commanded_color() {
        let transport = Arc::new(RecordingTransport::default());
        let mut worker = worker(Arc::clone(&transport));

        worker.process_all(color(Rgb::new(200, 100, 50))).await;

        assert_eq!(worker.last_color(SOFA), Rgb::new(200, 100, 50));
        assert_eq!(
            transport.sent(),
            vec![EchoRequest::Color(SOFA.to_string(), Rgb::new(200, 100, 50))]
        );
    }

    #[tokio::test]
    async fn should_dim_from_last_commanded_color() {
        let transport = Arc::new(RecordingTransport::default());
        let mut worker = worker(Arc::clone(&transport));

        worker.process_all(color(Rgb::new(200, 100, 50))).await;
        worker.process_all(brightness(50)).await;

        assert_eq!(
            transport.sent().last(),
            Some(&EchoRequest::Color(SOFA.to_string(), Rgb::new(100, 50, 25)))
        );
        assert_eq!(worker.last_color(SOFA), Rgb::new(100, 50, 25));
    }

    #[tokio::test]
    async fn should_dim_from_white_when_no_color_commanded() {
        let transport = Arc::new(RecordingTransport::default());
        let mut worker = worker(Arc::clone(&transport));

        worker.process_all(brightness(10)).await;

        assert_eq!(
            transport.sent(),
            vec![EchoRequest::Color(SOFA.to_string(), Rgb::new(25, 25, 25))]
        );
    }

    #[tokio::test]
    async fn should_keep_derived_event_off_the_queue() {
        let transport = Arc::new(RecordingTransport::default());
        let mut worker = worker(Arc::clone(&transport));

        worker.process(brightness(50)).await;

        assert!(transport.sent().is_empty());
        assert_eq!(worker.backlog.len(), 1);
    }

    #[tokio::test]
    async fn should_use_capabilities_of_unaddressed_device() {
        let registry = living_room()
            .adapter(AdapterConfig::new("particle", AdapterKind::Particle).unwrap())
            .device(
                Device::builder()
                    .id("e8b1a2c4")
                    .adapter_id("particle")
                    .name("Fan")
                    .capabilities(Capabilities::power_only())
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let transport = Arc::new(RecordingTransport::default());
        let mut worker = AdapterWorker::new(
            AdapterId::new("particle"),
            PowerOnlyTranslator,
            Arc::clone(&transport),
            Arc::new(registry),
        );

        worker
            .process_all(
                PowerMsg {
                    device_id: String::new(),
                    on: true,
                    command: None,
                }
                .into(),
            )
            .await;

        assert_eq!(transport.sent(), vec![EchoRequest::Power(String::new(), true)]);
    }

    #[tokio::test]
    async fn should_send_nothing_for_unsupported_event() {
        let transport = Arc::new(RecordingTransport::default());
        let mut worker = worker(Arc::clone(&transport));

        worker
            .process_all(
                PlaybackMsg {
                    device_id: SOFA.to_string(),
                    action: PlaybackAction::Play,
                }
                .into(),
            )
            .await;

        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn should_continue_after_transport_failure() {
        let transport = Arc::new(RecordingTransport {
            fail: true,
            ..RecordingTransport::default()
        });
        let mut worker = worker(Arc::clone(&transport));

        worker.process_all(color(Rgb::new(1, 2, 3))).await;
        worker.process_all(color(Rgb::new(4, 5, 6))).await;

        assert_eq!(transport.sent().len(), 2);
        assert_eq!(worker.last_color(SOFA), Rgb::new(4, 5, 6));
    }

    #[tokio::test(start_paused = true)]
    async fn should_time_out_stalled_request() {
        let mut worker = worker(StalledTransport).with_request_timeout(Duration::from_secs(15));

        let result = worker.deliver(EchoRequest::Power(SOFA.to_string(), true)).await;
        assert!(matches!(result, Err(HubError::Timeout(d)) if d == Duration::from_secs(15)));

        // A timed-out request does not wedge the worker.
        worker.process_all(color(Rgb::new(9, 9, 9))).await;
        assert_eq!(worker.last_color(SOFA), Rgb::new(9, 9, 9));
    }

    #[tokio::test]
    async fn should_deliver_queued_events_in_order() {
        let transport = Arc::new(RecordingTransport::default());
        let (tx, rx) = outbound_queue(AdapterId::new("triones"));
        let stop = CancellationToken::new();
        let task = worker(Arc::clone(&transport)).spawn(rx, stop.clone());

        tx.enqueue(
            PowerMsg {
                device_id: SOFA.to_string(),
                on: true,
                command: None,
            }
            .into(),
            &stop,
        )
        .await
        .unwrap();
        tx.enqueue(color(Rgb::new(200, 100, 50)), &stop).await.unwrap();
        tx.enqueue(brightness(50), &stop).await.unwrap();
        tx.enqueue(color(Rgb::new(1, 1, 1)), &stop).await.unwrap();
        drop(tx);

        task.await.unwrap();

        assert_eq!(
            transport.sent(),
            vec![
                EchoRequest::Power(SOFA.to_string(), true),
                EchoRequest::Color(SOFA.to_string(), Rgb::new(200, 100, 50)),
                EchoRequest::Color(SOFA.to_string(), Rgb::new(100, 50, 25)),
                EchoRequest::Color(SOFA.to_string(), Rgb::new(1, 1, 1)),
            ]
        );
    }

    #[tokio::test]
    async fn should_stop_without_draining() {
        let transport = Arc::new(RecordingTransport::default());
        let (tx, rx) = outbound_queue(AdapterId::new("triones"));
        let stop = CancellationToken::new();
        stop.cancel();

        // Space is available, so this lands in the queue despite `stop`.
        tx.enqueue(color(Rgb::new(1, 2, 3)), &stop).await.unwrap();
        worker(Arc::clone(&transport)).run(rx, stop).await;

        assert!(transport.sent().is_empty());
    }
}
