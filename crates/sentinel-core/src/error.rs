//! Core error types for sentinel-core.
//!
//! This module defines the error hierarchy for the detection pipeline using
//! thiserror. Backend (transport/parse) errors live next to the wire types
//! in [`crate::backend`]; everything else is defined here.

use std::path::PathBuf;
use thiserror::Error;

use crate::backend::BackendError;

/// Core error type for sentinel-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Backend transport or response errors
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    /// Classifier oracle errors
    #[error("inference error: {0}")]
    Inference(#[from] InferenceError),

    /// Pipeline startup errors
    #[error("setup error: {0}")]
    Setup(#[from] SetupError),

    /// Configuration-related errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// The classifier oracle failed on a single buffer.
///
/// Exactly one event is dropped (with a logged diagnostic) and the pipeline
/// continues; these never reach the aggregator.
#[derive(Error, Debug)]
pub enum InferenceError {
    /// Inference itself failed
    #[error("classification failed: {0}")]
    Failed(String),

    /// The classifier returned no ranked labels for the buffer
    #[error("classifier produced an empty ranking")]
    EmptyRanking,
}

/// The capture pipeline could not start.
///
/// Fatal for detection, surfaced to the caller; the surrounding application
/// degrades instead of terminating.
#[derive(Error, Debug)]
pub enum SetupError {
    /// A recorded classification stream could not be opened
    #[error("failed to open classification replay at {path}: {source}")]
    ReplayOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The capture device or session could not be started
    #[error("capture device unavailable: {details}")]
    CaptureUnavailable { details: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown or unreachable configuration key
    #[error("unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration or a value
    #[error("failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
