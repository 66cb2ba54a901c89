use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alert::Alert;

/// Every observable state change in the pipeline produces an Event.
/// Renderers subscribe to the controller's broadcast channel; nothing
/// mutates pipeline state through this surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// One classification cycle was consumed by the aggregator.
    CycleObserved {
        label: String,
        confidence: f64,
        streak: u32,
        total_seen: u64,
        at: DateTime<Utc>,
    },
    /// Consecutive detections reached the threshold.
    ThreatEscalated {
        room_code: String,
        total_seen: u64,
        at: DateTime<Utc>,
    },
    /// A locally detected threat was installed as the displayed alert.
    AlertRaised { alert: Alert, at: DateTime<Utc> },
    /// A polled backend alert replaced the displayed alert.
    AlertSynced { alert: Alert, at: DateTime<Utc> },
    /// The backend reports no events; the displayed alert was cleared.
    AlertCleared { at: DateTime<Utc> },
    /// The backend acknowledged a dispatched alert.
    DispatchAcked { message: String, at: DateTime<Utc> },
    /// A dispatch failed. Logged and discarded -- the local alert stands.
    DispatchFailed { error: String, at: DateTime<Utc> },
    /// A poll failed. The displayed alert is left unchanged.
    PollFailed { error: String, at: DateTime<Utc> },
    /// Full display snapshot.
    StateSnapshot {
        tracking: bool,
        current_room: String,
        last_label: Option<String>,
        last_confidence: Option<f64>,
        streak: u32,
        total_seen: u64,
        alert: Option<Alert>,
        at: DateTime<Utc>,
    },
}
