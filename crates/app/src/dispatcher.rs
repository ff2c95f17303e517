//! Dispatcher — the single serialization point for power decisions.
//!
//! One task drains two inbound queues (power intents and infrared key
//! presses), resolves targets against the [`Registry`], applies the group
//! power policies and enqueues [`PowerMsg`]s onto adapter queues. Because
//! every power-affecting input funnels through this one task, reads and
//! writes of the advisory power state never race.
//!
//! Enqueueing onto a full adapter queue suspends the dispatcher until that
//! adapter drains, so a stalled adapter delays commands for every other
//! adapter too.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use homerouter_domain::device::Device;
use homerouter_domain::device_group::DeviceGroup;
use homerouter_domain::error::{ConfigurationError, HubError, NotFoundError};
use homerouter_domain::event::{InboundEvent, InfraredEvent, PowerEvent, PowerMsg};
use homerouter_domain::policy::GroupPowerPolicy;

use crate::outbound::AdapterRouter;
use crate::power_state::PowerStateBook;
use crate::registry::{Registry, Target};

/// Inbound queues hold a single event; producers wait for the dispatcher.
const INBOUND_QUEUE_CAPACITY: usize = 1;

/// Cloneable entry point for input sources.
#[derive(Debug, Clone)]
pub struct DispatcherHandle {
    power_tx: mpsc::Sender<PowerEvent>,
    infrared_tx: mpsc::Sender<InfraredEvent>,
}

impl DispatcherHandle {
    /// Ask for a device or device group to be switched on or off.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Stopped`] when the dispatcher no longer runs.
    pub async fn submit_power_intent(
        &self,
        target_id: impl Into<String>,
        on: bool,
    ) -> Result<(), HubError> {
        self.power_tx
            .send(PowerEvent::new(target_id, on))
            .await
            .map_err(|_| HubError::Stopped)
    }

    /// Report a remote-control key press.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Stopped`] when the dispatcher no longer runs.
    pub async fn submit_infrared_event(&self, key: impl Into<String>) -> Result<(), HubError> {
        self.infrared_tx
            .send(InfraredEvent::new(key))
            .await
            .map_err(|_| HubError::Stopped)
    }

    /// Route any inbound event to the matching entry point.
    ///
    /// Presence and playback events have no dispatcher rule; they are
    /// logged and dropped.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Stopped`] when the dispatcher no longer runs.
    pub async fn submit(&self, event: InboundEvent) -> Result<(), HubError> {
        match event {
            InboundEvent::Power(power) => self.submit_power_intent(power.target_id, power.on).await,
            InboundEvent::Infrared(ir) => self.submit_infrared_event(ir.key).await,
            other => {
                tracing::debug!(event_type = other.event_type(), "inbound event not routed");
                Ok(())
            }
        }
    }
}

/// The dispatcher's state: shared read-only tables plus the advisory power
/// state it alone writes.
pub struct Dispatcher {
    registry: Arc<Registry>,
    router: AdapterRouter,
    policy: GroupPowerPolicy,
    power_state: PowerStateBook,
    stop: CancellationToken,
}

impl Dispatcher {
    /// Create a dispatcher over validated tables and registered adapter queues.
    #[must_use]
    pub fn new(registry: Arc<Registry>, router: AdapterRouter, stop: CancellationToken) -> Self {
        Self {
            registry,
            router,
            policy: GroupPowerPolicy::default(),
            power_state: PowerStateBook::default(),
            stop,
        }
    }

    /// Override the group power policies.
    #[must_use]
    pub fn with_policy(mut self, policy: GroupPowerPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Spawn the dispatcher loop and return its entry point.
    #[must_use]
    pub fn spawn(self) -> (DispatcherHandle, JoinHandle<()>) {
        let (power_tx, power_rx) = mpsc::channel(INBOUND_QUEUE_CAPACITY);
        let (infrared_tx, infrared_rx) = mpsc::channel(INBOUND_QUEUE_CAPACITY);
        let handle = DispatcherHandle {
            power_tx,
            infrared_tx,
        };
        let task = tokio::spawn(self.run(power_rx, infrared_rx));
        (handle, task)
    }

    /// Drain both inbound queues until stopped or every producer is gone.
    ///
    /// Failures are logged here and never end the loop. Queued events are
    /// abandoned on stop.
    pub async fn run(
        mut self,
        mut power_rx: mpsc::Receiver<PowerEvent>,
        mut infrared_rx: mpsc::Receiver<InfraredEvent>,
    ) {
        tracing::info!("dispatcher started");
        let stop = self.stop.clone();

        loop {
            let result = tokio::select! {
                biased;
                () = stop.cancelled() => break,
                Some(power) = power_rx.recv() => {
                    self.handle_power_intent(&power.target_id, power.on).await.map(|_| ())
                }
                Some(ir) = infrared_rx.recv() => self.handle_infrared(&ir.key).await.map(|_| ()),
                else => break,
            };

            if let Err(err) = result {
                report(&err);
            }
        }

        tracing::info!("dispatcher stopped");
    }

    /// Resolve `target_id` (device first, then group) and switch it.
    ///
    /// Returns the number of power commands enqueued.
    ///
    /// # Errors
    ///
    /// - [`HubError::NotFound`] when the id is neither a device nor a group;
    ///   nothing is enqueued and no state changes.
    /// - [`HubError::Configuration`] when a group member cannot be resolved
    ///   (nothing is enqueued for that group) or a device's adapter has no
    ///   queue.
    /// - [`HubError::Stopped`] / [`HubError::AdapterClosed`] when an enqueue
    ///   is abandoned.
    ///
    /// A group member whose command fails for any reason but `Stopped` is
    /// logged and skipped; the remaining members are still commanded and the
    /// first failure is returned afterwards.
    #[tracing::instrument(skip(self))]
    pub async fn handle_power_intent(&mut self, target_id: &str, on: bool) -> Result<usize, HubError> {
        let registry = Arc::clone(&self.registry);
        match registry.resolve_target(target_id) {
            Some(Target::Device(device)) => {
                self.issue_command(device, on).await?;
                Ok(1)
            }
            Some(Target::Group(group)) => self.switch_group(&registry, group, on).await,
            None => Err(NotFoundError {
                entity: "Device or group",
                id: target_id.to_string(),
            }
            .into()),
        }
    }

    /// Translate a remote key into its mapped power intent and handle it
    /// through the same path as [`handle_power_intent`](Self::handle_power_intent).
    ///
    /// Unmapped keys are logged and dropped; that returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Whatever the mapped power intent fails with.
    #[tracing::instrument(skip(self))]
    pub async fn handle_infrared(&mut self, key: &str) -> Result<Option<usize>, HubError> {
        let Some(mapping) = self.registry.infrared(key) else {
            tracing::info!(key, "infrared key has no mapping, ignored");
            return Ok(None);
        };
        let intent = mapping.intent();
        self.handle_power_intent(&intent.target_id, intent.on)
            .await
            .map(Some)
    }

    async fn switch_group(
        &mut self,
        registry: &Registry,
        group: &DeviceGroup,
        on: bool,
    ) -> Result<usize, HubError> {
        tracing::info!(group = %group.id, name = %group.name, on, "switching device group");

        // Resolve every member before commanding any of them, so a broken
        // group is rejected as a whole.
        let members = group
            .device_ids
            .iter()
            .map(|id| {
                registry.device(id.as_str()).ok_or_else(|| {
                    HubError::from(ConfigurationError::UnknownGroupMember {
                        group: group.id.to_string(),
                        device: id.to_string(),
                    })
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Only `Stopped` cuts the group short; other failures are per member.
        let mut issued = 0;
        let mut first_error = None;
        for device in members {
            let probably_on = self.power_state.probably_turned_on(&device.id);
            if !self.policy.should_command(on, probably_on) {
                tracing::debug!(device = %device.id, probably_on, "skipped by group policy");
                continue;
            }
            match self.issue_command(device, on).await {
                Ok(()) => issued += 1,
                Err(HubError::Stopped) => return Err(HubError::Stopped),
                Err(err) => {
                    tracing::error!(
                        group = %group.id,
                        device = %device.id,
                        error = %err,
                        "group member not commanded"
                    );
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(issued),
        }
    }

    /// Enqueue a power command for `device` and record it as probably
    /// switched.
    async fn issue_command(&mut self, device: &Device, on: bool) -> Result<(), HubError> {
        let Some(sender) = self.router.get(device.adapter_id.as_str()) else {
            return Err(ConfigurationError::UnknownAdapter {
                device: device.id.to_string(),
                adapter: device.adapter_id.to_string(),
            }
            .into());
        };

        tracing::info!(device = %device.id, name = %device.name, on, "power command");

        let msg = PowerMsg {
            device_id: device.adapters_device_id.clone(),
            on,
            command: device.power_command(on).map(str::to_string),
        };
        sender.enqueue(msg.into(), &self.stop).await?;

        self.power_state.record(&device.id, on);
        Ok(())
    }
}

fn report(err: &HubError) {
    match err {
        HubError::NotFound(inner) => tracing::warn!(error = %inner, "power intent dropped"),
        HubError::Configuration(inner) => {
            tracing::error!(error = %inner, "registry inconsistency, power intent rejected");
        }
        HubError::Stopped => tracing::debug!("power command abandoned, stopping"),
        other => tracing::error!(error = %other, "power intent failed"),
    }
}
