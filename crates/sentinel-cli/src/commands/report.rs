use chrono::Utc;
use sentinel_core::alert::{timefmt, DETECTION_CHANNEL};
use sentinel_core::schedule;
use sentinel_core::Config;

use super::CommandResult;

pub fn run(room: Option<String>) -> CommandResult {
    let config = Config::load()?;
    let school_id = super::require_school_id(&config)?;
    let client = super::client_from(&config)?;

    let room = match room {
        Some(room) => room,
        None => schedule::resolve(&config.schedule, timefmt::in_backend_zone(Utc::now())),
    };

    let rt = super::runtime()?;
    let message = rt.block_on(client.report_event(&room, DETECTION_CHANNEL, school_id))?;
    println!("{message}");
    Ok(())
}
