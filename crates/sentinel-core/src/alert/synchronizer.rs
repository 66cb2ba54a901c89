//! Alert dedup/sync state machine.
//!
//! Owns the displayed alert. The state changes only by whole replacement:
//! a polled alert identical to the current one is an idempotent refresh, a
//! different one replaces it, a successful empty poll clears it, and poll
//! failures leave it untouched. Consecutive failures open a bounded
//! exponential backoff window during which polls are skipped.

use chrono::{DateTime, Duration, Utc};

use super::Alert;

/// Bounded exponential backoff for consecutive poll failures.
#[derive(Debug, Clone, Copy)]
pub struct BackoffPolicy {
    pub base: Duration,
    pub max: Duration,
}

impl BackoffPolicy {
    pub fn from_secs(base_secs: u64, max_secs: u64) -> Self {
        Self {
            base: Duration::seconds(base_secs as i64),
            max: Duration::seconds(max_secs as i64),
        }
    }

    /// Delay after `failures` consecutive failures: `base * 2^(failures-1)`,
    /// capped at `max`.
    fn delay(&self, failures: u32) -> Duration {
        let mut delay = self.base;
        for _ in 1..failures {
            delay = delay * 2;
            if delay >= self.max {
                return self.max;
            }
        }
        delay.min(self.max)
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::from_secs(2, 60)
    }
}

/// What applying a poll result did to the displayed alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Replaced(Alert),
    Cleared,
    Unchanged,
}

/// Polls are applied here; the controller reads `current` for display and
/// never mutates it directly.
#[derive(Debug)]
pub struct AlertSynchronizer {
    current: Option<Alert>,
    policy: BackoffPolicy,
    consecutive_failures: u32,
    retry_after: Option<DateTime<Utc>>,
}

impl AlertSynchronizer {
    pub fn new(policy: BackoffPolicy) -> Self {
        Self {
            current: None,
            policy,
            consecutive_failures: 0,
            retry_after: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn current(&self) -> Option<&Alert> {
        self.current.as_ref()
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Whether the next cycle should poll, honoring the backoff window.
    pub fn should_poll(&self, now: DateTime<Utc>) -> bool {
        self.retry_after.map_or(true, |after| now >= after)
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Apply a successful poll. `None` means the backend holds no events.
    pub fn apply_success(&mut self, polled: Option<Alert>) -> SyncOutcome {
        self.consecutive_failures = 0;
        self.retry_after = None;

        match polled {
            Some(alert) => {
                if self.current.as_ref() == Some(&alert) {
                    SyncOutcome::Unchanged
                } else {
                    self.current = Some(alert.clone());
                    SyncOutcome::Replaced(alert)
                }
            }
            None => {
                if self.current.take().is_some() {
                    SyncOutcome::Cleared
                } else {
                    SyncOutcome::Unchanged
                }
            }
        }
    }

    /// Record a poll failure. The displayed alert is untouched; the backoff
    /// window until the next attempt is returned.
    pub fn apply_failure(&mut self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        let until = now + self.policy.delay(self.consecutive_failures);
        self.retry_after = Some(until);
        until
    }

    /// Install a locally detected alert. Replaces whatever is displayed.
    pub fn install_local(&mut self, alert: Alert) {
        self.current = Some(alert);
    }
}

impl Default for AlertSynchronizer {
    fn default() -> Self {
        Self::new(BackoffPolicy::default())
    }
}
