//! # Sentinel Core Library
//!
//! This library provides the core business logic for the Sentinel
//! safety-alert client. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary, with any GUI shell
//! being a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Threat Aggregator**: a streaming counter over classification events
//!   that emits a one-shot escalation when consecutive non-background
//!   detections reach the threshold
//! - **Schedule Resolver**: pure weekly-schedule-to-room lookup
//! - **Alert Sync**: fire-and-forget dispatch to the backend plus a polling
//!   synchronizer that dedups the authoritative latest alert
//! - **Controller**: a single-writer event loop that owns all mutable
//!   pipeline state; the classifier oracle hands events across a channel
//!
//! ## Key Components
//!
//! - [`ThreatAggregator`]: consecutive-detection state machine
//! - [`Controller`]: pipeline orchestration
//! - [`BackendClient`]: JSON-over-POST backend access
//! - [`Config`]: application configuration management

pub mod alert;
pub mod backend;
pub mod classify;
pub mod controller;
pub mod error;
pub mod events;
pub mod schedule;
pub mod storage;

pub use alert::{Alert, AlertDispatcher, AlertSynchronizer, BackoffPolicy, SyncOutcome};
pub use backend::{BackendClient, BackendError, School};
pub use classify::{
    ChannelObserver, ClassificationEvent, ClassificationObserver, Classifier, ReplaySource,
    ThreatAggregator,
};
pub use controller::{Controller, TrackingFlag};
pub use error::{ConfigError, CoreError, InferenceError, SetupError};
pub use events::Event;
pub use schedule::{ScheduleEntry, WeekSchedule};
pub use storage::Config;
