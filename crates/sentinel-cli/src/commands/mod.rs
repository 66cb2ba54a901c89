pub mod config;
pub mod monitor;
pub mod register;
pub mod report;
pub mod resolve;
pub mod schedule;
pub mod schools;
pub mod status;
pub mod track;

use std::sync::Arc;
use std::time::Duration;

use chrono::Weekday;
use sentinel_core::{BackendClient, Config};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Build the tokio runtime for commands that talk to the backend.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, Box<dyn std::error::Error>> {
    Ok(tokio::runtime::Runtime::new()?)
}

/// Backend client from the persisted configuration.
pub(crate) fn client_from(config: &Config) -> Result<Arc<BackendClient>, Box<dyn std::error::Error>> {
    let client = BackendClient::new(
        config.backend.base_url.clone(),
        Duration::from_secs(config.backend.timeout_secs),
    )?;
    Ok(Arc::new(client))
}

/// The configured school, or a hint to run `register` first.
pub(crate) fn require_school_id(config: &Config) -> Result<i64, Box<dyn std::error::Error>> {
    config
        .backend
        .school_id
        .ok_or_else(|| "no school configured; run `sentinel-cli register` first".into())
}

/// Parse a weekday name or its three-letter prefix.
pub(crate) fn parse_day(day: &str) -> Result<Weekday, Box<dyn std::error::Error>> {
    match day.to_lowercase().as_str() {
        "mon" | "monday" => Ok(Weekday::Mon),
        "tue" | "tuesday" => Ok(Weekday::Tue),
        "wed" | "wednesday" => Ok(Weekday::Wed),
        "thu" | "thursday" => Ok(Weekday::Thu),
        "fri" | "friday" => Ok(Weekday::Fri),
        "sat" | "saturday" => Ok(Weekday::Sat),
        "sun" | "sunday" => Ok(Weekday::Sun),
        other => Err(format!("unknown weekday: {other}").into()),
    }
}
