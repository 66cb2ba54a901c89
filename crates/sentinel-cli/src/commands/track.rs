use clap::Subcommand;
use sentinel_core::Config;

use super::CommandResult;

#[derive(Subcommand)]
pub enum TrackAction {
    /// Enable alert dispatch
    On,
    /// Disable alert dispatch (detection keeps running)
    Off,
    /// Show the current setting
    Status,
}

pub fn run(action: TrackAction) -> CommandResult {
    let mut config = Config::load()?;
    match action {
        TrackAction::On => {
            config.detection.tracking = true;
            config.save()?;
            println!("tracking enabled");
        }
        TrackAction::Off => {
            config.detection.tracking = false;
            config.save()?;
            println!("tracking disabled");
        }
        TrackAction::Status => {
            println!("{}", config.detection.tracking);
        }
    }
    Ok(())
}
