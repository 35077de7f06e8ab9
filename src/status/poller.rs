//! Fixed-cadence status polling.
//!
//! Each tick issues an independent request; a slow request never delays the
//! next tick. Results are forwarded in completion order to whoever owns the
//! state machine. Failed polls are logged and dropped so a single bad
//! response cannot flicker the console into a false state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::client::SupervisorApi;

use super::StatusSnapshot;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(800);

pub struct StatusPoller {
    api: Arc<dyn SupervisorApi>,
    period: Duration,
    sink: mpsc::Sender<StatusSnapshot>,
    /// Bumped on every start/stop. Requests issued under an older generation
    /// drop their result instead of forwarding it.
    generation: Arc<AtomicU64>,
    schedule: Option<JoinHandle<()>>,
}

impl StatusPoller {
    pub fn new(
        api: Arc<dyn SupervisorApi>,
        period: Duration,
        sink: mpsc::Sender<StatusSnapshot>,
    ) -> Self {
        Self {
            api,
            period,
            sink,
            generation: Arc::new(AtomicU64::new(0)),
            schedule: None,
        }
    }

    /// Begin polling. Restarts the schedule if it is already active, so there
    /// is never more than one timer. The first request goes out one full
    /// period after the call.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        self.cancel_schedule();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let api = Arc::clone(&self.api);
        let sink = self.sink.clone();
        let current = Arc::clone(&self.generation);
        let period = self.period;

        self.schedule = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                tokio::spawn(poll_once(
                    Arc::clone(&api),
                    sink.clone(),
                    Arc::clone(&current),
                    generation,
                ));
            }
        }));
        tracing::debug!(period_ms = period.as_millis() as u64, "Status polling started");
    }

    /// Cancel the schedule. Requests already in flight are not cancelled, but
    /// their results are discarded. No-op when not polling.
    pub fn stop(&mut self) {
        if self.cancel_schedule() {
            tracing::debug!("Status polling stopped");
        }
    }

    pub fn is_active(&self) -> bool {
        self.schedule.is_some()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    fn cancel_schedule(&mut self) -> bool {
        match self.schedule.take() {
            Some(handle) => {
                handle.abort();
                self.generation.fetch_add(1, Ordering::SeqCst);
                true
            }
            None => false,
        }
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        self.cancel_schedule();
    }
}

async fn poll_once(
    api: Arc<dyn SupervisorApi>,
    sink: mpsc::Sender<StatusSnapshot>,
    current: Arc<AtomicU64>,
    generation: u64,
) {
    let snapshot = match api.status().await {
        Ok(snapshot) => snapshot,
        Err(err) => {
            tracing::debug!(error = %err, "Status poll failed");
            return;
        }
    };

    if current.load(Ordering::SeqCst) != generation {
        tracing::trace!("Discarding snapshot from a cancelled schedule");
        return;
    }

    if sink.send(snapshot).await.is_err() {
        tracing::trace!("Snapshot dropped (receiver gone)");
    }
}
