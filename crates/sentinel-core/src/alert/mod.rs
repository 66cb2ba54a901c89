//! Alert value type, dispatch, and synchronization.

mod dispatcher;
mod synchronizer;
pub mod timefmt;

pub use dispatcher::AlertDispatcher;
pub use synchronizer::{AlertSynchronizer, BackoffPolicy, SyncOutcome};

use serde::{Deserialize, Serialize};

/// Detection channel reported for audio-classified threats.
pub const DETECTION_CHANNEL: &str = "audio";

/// The alert shown to the user.
///
/// Two alerts are the same alert iff all three fields match exactly --
/// string equality, including the formatted timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub room_code: String,
    pub alert_type: String,
    pub timestamp: String,
}
