use chrono::{Datelike, NaiveTime, Utc};
use sentinel_core::alert::timefmt;
use sentinel_core::schedule;
use sentinel_core::Config;

use super::CommandResult;

pub fn run(day: Option<String>, at: Option<String>) -> CommandResult {
    let config = Config::load()?;
    let now = timefmt::in_backend_zone(Utc::now());

    let weekday = match day {
        Some(day) => super::parse_day(&day)?,
        None => now.weekday(),
    };
    let time = match at {
        Some(at) => NaiveTime::parse_from_str(&at, "%H:%M")?,
        None => now.time(),
    };

    let room = schedule::resolve_at(&config.schedule, weekday, time);
    println!("{room}");
    Ok(())
}
