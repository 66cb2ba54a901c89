//! Wire types and errors for the alert backend.

use serde::{Deserialize, Serialize};

/// A school as listed by `/get_schools`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    pub id: i64,
    pub name: String,
}

/// Backend error types.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Request, connection, or timeout failure.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body is missing or has a malformed expected field.
    #[error("invalid response from {endpoint}: missing or malformed '{field}'")]
    InvalidResponse {
        endpoint: &'static str,
        field: &'static str,
    },
}
