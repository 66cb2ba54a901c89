//! Pipeline controller.
//!
//! A single-writer event loop owns every piece of mutable pipeline state
//! (aggregator, displayed alert). Classification events arrive over a
//! bounded channel from the oracle's context and are processed in arrival
//! order, one at a time. Network work runs on spawned tasks and marshals
//! its results back into the loop, so nothing blocks event consumption.
//!
//! Construction is two-phase: build the backend client, schedule, and flags
//! first, then inject them -- there is no implicit default controller.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, warn};

use crate::alert::{
    timefmt, Alert, AlertDispatcher, AlertSynchronizer, BackoffPolicy, SyncOutcome,
    DETECTION_CHANNEL,
};
use crate::backend::{BackendClient, BackendError};
use crate::classify::{ClassificationEvent, ThreatAggregator};
use crate::events::Event;
use crate::schedule::{self, WeekSchedule};

/// Externally togglable dispatch gate.
///
/// Gates dispatch only -- detection and counting continue while disabled.
/// A toggle is observed by the very next cycle.
#[derive(Debug, Clone)]
pub struct TrackingFlag(Arc<AtomicBool>);

impl TrackingFlag {
    pub fn new(enabled: bool) -> Self {
        Self(Arc::new(AtomicBool::new(enabled)))
    }

    pub fn set(&self, enabled: bool) {
        self.0.store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Outcome of one spawned poll, marshalled back to the loop.
struct PollResult {
    epoch: u64,
    outcome: Result<Option<Alert>, BackendError>,
}

/// Orchestrates one classification cycle at a time.
pub struct Controller {
    client: Arc<BackendClient>,
    schedule: WeekSchedule,
    school_id: i64,
    aggregator: ThreatAggregator,
    synchronizer: AlertSynchronizer,
    dispatcher: AlertDispatcher,
    tracking: TrackingFlag,
    events_tx: broadcast::Sender<Event>,
    last_label: Option<String>,
    last_confidence: Option<f64>,
    /// Bumped on every locally raised alert. Poll results launched before
    /// the bump are stale and discarded, so a fresh local detection always
    /// wins over an in-flight poll.
    local_epoch: u64,
    poll_in_flight: bool,
}

impl Controller {
    pub fn new(
        client: Arc<BackendClient>,
        schedule: WeekSchedule,
        school_id: i64,
        threshold: u32,
        tracking: TrackingFlag,
        backoff: BackoffPolicy,
    ) -> Self {
        let (events_tx, _) = broadcast::channel(256);
        let dispatcher = AlertDispatcher::new(Arc::clone(&client), school_id, events_tx.clone());
        Self {
            client,
            schedule,
            school_id,
            aggregator: ThreatAggregator::new(threshold),
            synchronizer: AlertSynchronizer::new(backoff),
            dispatcher,
            tracking,
            events_tx,
            last_label: None,
            last_confidence: None,
            local_epoch: 0,
            poll_in_flight: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events_tx.subscribe()
    }

    pub fn current_alert(&self) -> Option<&Alert> {
        self.synchronizer.current()
    }

    pub fn streak(&self) -> u32 {
        self.aggregator.streak()
    }

    pub fn total_seen(&self) -> u64 {
        self.aggregator.total_seen()
    }

    pub fn tracking(&self) -> &TrackingFlag {
        &self.tracking
    }

    /// Build a full display snapshot event.
    pub fn snapshot(&self) -> Event {
        let now = Utc::now();
        Event::StateSnapshot {
            tracking: self.tracking.is_enabled(),
            current_room: schedule::resolve(&self.schedule, timefmt::in_backend_zone(now)),
            last_label: self.last_label.clone(),
            last_confidence: self.last_confidence,
            streak: self.aggregator.streak(),
            total_seen: self.aggregator.total_seen(),
            alert: self.synchronizer.current().cloned(),
            at: now,
        }
    }

    // ── Event loop ───────────────────────────────────────────────────

    /// Consume classification events until the sender side closes, then
    /// drain any in-flight poll and return the final controller state.
    pub async fn run(mut self, mut events_rx: mpsc::Receiver<ClassificationEvent>) -> Self {
        let (poll_tx, mut poll_rx) = mpsc::channel::<PollResult>(8);

        loop {
            tokio::select! {
                maybe_event = events_rx.recv() => {
                    match maybe_event {
                        Some(event) => self.handle_cycle(event, &poll_tx),
                        None => break,
                    }
                }
                Some(result) = poll_rx.recv() => {
                    self.handle_poll_result(result);
                }
            }
        }

        // Producer is gone; let an in-flight poll land before shutting down.
        while self.poll_in_flight {
            match poll_rx.recv().await {
                Some(result) => self.handle_poll_result(result),
                None => break,
            }
        }

        self.emit(self.snapshot());
        self
    }

    fn handle_cycle(&mut self, event: ClassificationEvent, poll_tx: &mpsc::Sender<PollResult>) {
        self.last_label = Some(event.label.clone());
        self.last_confidence = Some(event.confidence);

        let escalation = self.aggregator.observe(&event);
        self.emit(Event::CycleObserved {
            label: event.label,
            confidence: event.confidence,
            streak: self.aggregator.streak(),
            total_seen: self.aggregator.total_seen(),
            at: event.at,
        });

        if let Some(escalation) = escalation {
            if self.tracking.is_enabled() {
                self.raise_local_alert(escalation.total_seen, event.at);
                return;
            }
            debug!(
                total_seen = escalation.total_seen,
                "escalation while tracking disabled, dispatch suppressed"
            );
        }
        self.request_poll(poll_tx);
    }

    /// Optimistic local alert: shown before any backend acknowledgment.
    fn raise_local_alert(&mut self, total_seen: u64, at: DateTime<Utc>) {
        let room_code = schedule::resolve(&self.schedule, timefmt::in_backend_zone(at));
        self.emit(Event::ThreatEscalated {
            room_code: room_code.clone(),
            total_seen,
            at,
        });

        let alert = Alert {
            room_code: room_code.clone(),
            alert_type: DETECTION_CHANNEL.to_string(),
            timestamp: timefmt::display_at(at),
        };
        self.local_epoch += 1;
        self.synchronizer.install_local(alert.clone());
        self.emit(Event::AlertRaised { alert, at });

        self.dispatcher.fire(room_code);
    }

    fn request_poll(&mut self, poll_tx: &mpsc::Sender<PollResult>) {
        if self.poll_in_flight || !self.synchronizer.should_poll(Utc::now()) {
            return;
        }
        self.poll_in_flight = true;

        let client = Arc::clone(&self.client);
        let school_id = self.school_id;
        let epoch = self.local_epoch;
        let tx = poll_tx.clone();
        tokio::spawn(async move {
            let outcome = client.latest_event(school_id).await;
            let _ = tx.send(PollResult { epoch, outcome }).await;
        });
    }

    fn handle_poll_result(&mut self, result: PollResult) {
        self.poll_in_flight = false;

        if result.epoch != self.local_epoch {
            debug!("stale poll result discarded, local alert stands");
            return;
        }

        let at = Utc::now();
        match result.outcome {
            Ok(polled) => match self.synchronizer.apply_success(polled) {
                SyncOutcome::Replaced(alert) => self.emit(Event::AlertSynced { alert, at }),
                SyncOutcome::Cleared => self.emit(Event::AlertCleared { at }),
                SyncOutcome::Unchanged => {}
            },
            Err(err) => {
                warn!(error = %err, "alert poll failed, display unchanged");
                self.synchronizer.apply_failure(at);
                self.emit(Event::PollFailed {
                    error: err.to_string(),
                    at,
                });
            }
        }
    }

    fn emit(&self, event: Event) {
        let _ = self.events_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracking_flag_toggles_across_clones() {
        let flag = TrackingFlag::new(true);
        let handle = flag.clone();
        assert!(flag.is_enabled());

        handle.set(false);
        assert!(!flag.is_enabled());

        handle.set(true);
        assert!(flag.is_enabled());
    }

    #[test]
    fn snapshot_reflects_initial_state() {
        let client = Arc::new(
            BackendClient::new("http://localhost:9", std::time::Duration::from_secs(1))
                .expect("client builds"),
        );
        let controller = Controller::new(
            client,
            WeekSchedule::default(),
            3,
            3,
            TrackingFlag::new(true),
            BackoffPolicy::default(),
        );

        match controller.snapshot() {
            Event::StateSnapshot {
                tracking,
                current_room,
                streak,
                total_seen,
                alert,
                ..
            } => {
                assert!(tracking);
                assert_eq!(current_room, schedule::NO_ROOM);
                assert_eq!(streak, 0);
                assert_eq!(total_seen, 0);
                assert!(alert.is_none());
            }
            other => panic!("expected StateSnapshot, got {other:?}"),
        }
    }
}
