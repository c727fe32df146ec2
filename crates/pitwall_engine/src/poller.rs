//! Fixed-interval status polling for a single import job.
//!
//! The first status query goes out immediately, later ones follow a
//! wall-clock interval that does not wait for earlier responses, so requests
//! may overlap. Each request carries a sequence number so consumers can drop
//! responses that arrive out of order.
//!
//! Polling ends when a response reports a status outside the pending set,
//! when a request fails, or when the returned [`PollHandle`] is cancelled or
//! dropped. Responses that land after that point are discarded.

use std::sync::Arc;
use std::time::Duration;

use pitwall_core::PollSeq;
use pitwall_logging::{pitwall_debug, pitwall_info, pitwall_warn};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::{ApiKey, EngineEvent, ImportApi};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub struct MonitorSettings {
    pub poll_interval: Duration,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Cancellation handle for a running poller. Dropping it stops the poller.
#[derive(Debug)]
pub struct PollHandle {
    import_id: String,
    token: CancellationToken,
}

impl PollHandle {
    pub fn import_id(&self) -> &str {
        &self.import_id
    }

    pub fn cancel(&self) {
        if !self.token.is_cancelled() {
            pitwall_debug!("Cancelling poller for import {}", self.import_id);
        }
        self.token.cancel();
    }

    /// True once the poller has stopped issuing requests, for any reason.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Spawns a poller on the current tokio runtime.
///
/// # Panics
///
/// Must be called from within a tokio runtime context.
pub fn spawn_status_poller(
    api: Arc<dyn ImportApi>,
    key: ApiKey,
    import_id: impl Into<String>,
    interval: Duration,
    sink: Arc<dyn EventSink>,
) -> PollHandle {
    let import_id = import_id.into();
    let token = CancellationToken::new();
    let poller = Poller {
        api,
        key,
        import_id: import_id.clone(),
        sink,
        token: token.clone(),
    };
    tokio::spawn(poller.run(interval));
    PollHandle { import_id, token }
}

#[derive(Clone)]
struct Poller {
    api: Arc<dyn ImportApi>,
    key: ApiKey,
    import_id: String,
    sink: Arc<dyn EventSink>,
    token: CancellationToken,
}

impl Poller {
    async fn run(self, interval: Duration) {
        pitwall_info!(
            "Polling import {} every {:?}",
            self.import_id,
            interval
        );
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut seq: PollSeq = 0;

        loop {
            tokio::select! {
                biased;
                _ = self.token.cancelled() => break,
                _ = ticker.tick() => {}
            }
            seq += 1;
            tokio::spawn(self.clone().query(seq));
        }
        pitwall_debug!("Poller for import {} stopped after {} requests", self.import_id, seq);
    }

    async fn query(self, seq: PollSeq) {
        pitwall_debug!("Status request #{} for import {}", seq, self.import_id);
        let result = tokio::select! {
            biased;
            _ = self.token.cancelled() => return,
            result = self.api.import_status(&self.key, &self.import_id) => result,
        };
        if self.token.is_cancelled() {
            return;
        }

        let halt = match &result {
            Ok(snapshot) if snapshot.status.is_pending() => {
                pitwall_debug!("Import {} is {} (#{})", self.import_id, snapshot.status, seq);
                false
            }
            Ok(snapshot) => {
                pitwall_info!(
                    "Import {} reached {} after {} requests",
                    self.import_id,
                    snapshot.status,
                    seq
                );
                true
            }
            Err(err) => {
                pitwall_warn!(
                    "Status request #{} for import {} failed: {}",
                    seq,
                    self.import_id,
                    err
                );
                true
            }
        };
        if halt {
            self.token.cancel();
        }
        self.sink.emit(EngineEvent::PollCompleted {
            import_id: self.import_id.clone(),
            seq,
            result,
        });
    }
}
