mod config;

pub use config::{BackendConfig, Config, DetectionConfig, SyncConfig};

use std::path::PathBuf;

/// Returns `~/.config/sentinel[-dev]/` based on SENTINEL_ENV.
///
/// Set SENTINEL_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SENTINEL_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("sentinel-dev")
    } else {
        base_dir.join("sentinel")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
