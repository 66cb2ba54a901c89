//! Threat aggregation state machine.
//!
//! Counts consecutive non-background classifications and emits a one-shot
//! escalation when the streak reaches the threshold.
//!
//! ## State Transitions
//!
//! ```text
//! Idle(streak=0) -> Accumulating(1..threshold-1) -> escalate -> Idle
//! ```
//!
//! All mutation happens on the controller's consumption loop; the classifier
//! oracle hands events over a channel first. The aggregator itself cannot
//! fail -- it is pure arithmetic over already-validated events.

use super::{ClassificationEvent, BACKGROUND_LABEL};

/// Consecutive detections needed to escalate.
pub const DEFAULT_THRESHOLD: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregatorState {
    Idle,
    Accumulating,
}

/// The one-shot action fired on a threshold crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Escalation {
    /// Streak value at the moment of the crossing (== threshold).
    pub streak: u32,
    /// Diagnostic event count, not part of alerting logic.
    pub total_seen: u64,
}

/// Streaming counter over classification events.
#[derive(Debug, Clone)]
pub struct ThreatAggregator {
    threshold: u32,
    streak: u32,
    total_seen: u64,
}

impl ThreatAggregator {
    /// Create an aggregator with the given threshold.
    ///
    /// A threshold below 1 is clamped to 1.
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1),
            streak: 0,
            total_seen: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> AggregatorState {
        if self.streak == 0 {
            AggregatorState::Idle
        } else {
            AggregatorState::Accumulating
        }
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn total_seen(&self) -> u64 {
        self.total_seen
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Consume one event. Returns the escalation if this event crossed the
    /// threshold; the streak is reset in the same step, so escalation fires
    /// at most once per crossing.
    pub fn observe(&mut self, event: &ClassificationEvent) -> Option<Escalation> {
        self.total_seen += 1;

        if event.label == BACKGROUND_LABEL {
            self.streak = 0;
            return None;
        }

        self.streak += 1;
        if self.streak >= self.threshold {
            let escalation = Escalation {
                streak: self.streak,
                total_seen: self.total_seen,
            };
            self.streak = 0;
            return Some(escalation);
        }
        None
    }
}

impl Default for ThreatAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}
