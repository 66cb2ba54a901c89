//! Alert backend access.
//!
//! JSON-over-POST endpoints; responses are checked field by field and a
//! missing key is an invalid response, never partial data.

mod client;
mod types;

pub use client::BackendClient;
pub use types::{BackendError, School};
