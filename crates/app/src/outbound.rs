//! Adapter outbound queues.
//!
//! Each adapter owns one bounded MPSC queue of [`OutboundEvent`]s
//! ([`OUTBOUND_QUEUE_CAPACITY`] entries) drained by exactly one worker.
//! Producers hold an [`OutboundSender`]; the dispatcher reaches senders
//! through the [`AdapterRouter`], keyed by adapter id.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio_util::sync::CancellationToken;

use homerouter_domain::adapter::OUTBOUND_QUEUE_CAPACITY;
use homerouter_domain::error::HubError;
use homerouter_domain::event::OutboundEvent;
use homerouter_domain::id::AdapterId;

/// Create the outbound queue for one adapter.
#[must_use]
pub fn outbound_queue(adapter_id: AdapterId) -> (OutboundSender, mpsc::Receiver<OutboundEvent>) {
    let (tx, rx) = mpsc::channel(OUTBOUND_QUEUE_CAPACITY);
    (OutboundSender { adapter_id, tx }, rx)
}

/// Producer side of an adapter's outbound queue.
#[derive(Debug, Clone)]
pub struct OutboundSender {
    adapter_id: AdapterId,
    tx: mpsc::Sender<OutboundEvent>,
}

impl OutboundSender {
    #[must_use]
    pub fn adapter_id(&self) -> &AdapterId {
        &self.adapter_id
    }

    /// Enqueue an event, waiting for space when the queue is full.
    ///
    /// A full queue means the caller stalls until the adapter's worker
    /// drains an entry; a warning is logged before waiting. The wait ends
    /// early when `stop` is cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Stopped`] when `stop` fires while waiting, or
    /// [`HubError::AdapterClosed`] when the adapter's worker has exited.
    pub async fn enqueue(
        &self,
        event: OutboundEvent,
        stop: &CancellationToken,
    ) -> Result<(), HubError> {
        let event = match self.tx.try_send(event) {
            Ok(()) => return Ok(()),
            Err(TrySendError::Closed(_)) => return Err(self.closed()),
            Err(TrySendError::Full(event)) => event,
        };

        tracing::warn!(
            adapter = %self.adapter_id,
            capacity = OUTBOUND_QUEUE_CAPACITY,
            event_type = event.event_type(),
            "adapter queue full, waiting for it to drain"
        );

        tokio::select! {
            () = stop.cancelled() => Err(HubError::Stopped),
            result = self.tx.send(event) => result.map_err(|_| self.closed()),
        }
    }

    fn closed(&self) -> HubError {
        HubError::AdapterClosed(self.adapter_id.to_string())
    }
}

/// Adapter id → outbound queue, fixed after startup.
#[derive(Debug, Default, Clone)]
pub struct AdapterRouter {
    senders: HashMap<AdapterId, OutboundSender>,
}

impl AdapterRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter's queue. A second registration for the same
    /// adapter id replaces the first.
    #[must_use]
    pub fn with(mut self, sender: OutboundSender) -> Self {
        self.senders.insert(sender.adapter_id.clone(), sender);
        self
    }

    #[must_use]
    pub fn get(&self, adapter_id: &str) -> Option<&OutboundSender> {
        self.senders.get(adapter_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.senders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }
}
