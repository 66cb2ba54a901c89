//! Fire-and-forget alert dispatch.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use super::DETECTION_CHANNEL;
use crate::backend::{BackendClient, BackendError};
use crate::events::Event;

/// Pushes a detected threat to the backend, once per escalation.
///
/// Failures are logged and discarded: no retry, no blocking of the
/// controller, and no rollback of the optimistic local alert.
#[derive(Clone)]
pub struct AlertDispatcher {
    client: Arc<BackendClient>,
    school_id: i64,
    events_tx: broadcast::Sender<Event>,
}

impl AlertDispatcher {
    pub fn new(
        client: Arc<BackendClient>,
        school_id: i64,
        events_tx: broadcast::Sender<Event>,
    ) -> Self {
        Self {
            client,
            school_id,
            events_tx,
        }
    }

    /// One outbound report. Success is the backend's ack message -- the
    /// backend also acks (with a different message) when it suppresses a
    /// duplicate inside its own dedup window.
    pub async fn dispatch(&self, room_code: &str) -> Result<String, BackendError> {
        self.client
            .report_event(room_code, DETECTION_CHANNEL, self.school_id)
            .await
    }

    /// Fire-and-forget dispatch on a worker task.
    pub fn fire(&self, room_code: String) {
        let dispatcher = self.clone();
        tokio::spawn(async move {
            match dispatcher.dispatch(&room_code).await {
                Ok(message) => {
                    debug!(%message, %room_code, "alert dispatched");
                    let _ = dispatcher.events_tx.send(Event::DispatchAcked {
                        message,
                        at: Utc::now(),
                    });
                }
                Err(err) => {
                    warn!(error = %err, %room_code, "alert dispatch failed");
                    let _ = dispatcher.events_tx.send(Event::DispatchFailed {
                        error: err.to_string(),
                        at: Utc::now(),
                    });
                }
            }
        });
    }
}
