use chrono::NaiveTime;
use clap::Subcommand;
use sentinel_core::{Config, ScheduleEntry};

use super::CommandResult;

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Add an entry to a weekday
    Add {
        /// Weekday (mon..sun)
        #[arg(long)]
        day: String,
        /// Start time as HH:MM
        #[arg(long)]
        start: String,
        /// Room code
        #[arg(long)]
        room: String,
    },
    /// Print the week schedule
    Show,
    /// Remove all entries, or one weekday's
    Clear {
        #[arg(long)]
        day: Option<String>,
    },
}

pub fn run(action: ScheduleAction) -> CommandResult {
    let mut config = Config::load()?;

    match action {
        ScheduleAction::Add { day, start, room } => {
            let weekday = super::parse_day(&day)?;
            let start_time = NaiveTime::parse_from_str(&start, "%H:%M")?;

            // Editor contract: day sequences stay in chronological order.
            // Entries sharing a start time keep insertion order, so the
            // newest wins at resolution.
            let entries = config.schedule.day_mut(weekday);
            let position = entries
                .iter()
                .position(|entry| entry.start_time > start_time)
                .unwrap_or(entries.len());
            entries.insert(
                position,
                ScheduleEntry {
                    start_time,
                    room_code: room.clone(),
                },
            );
            config.save()?;
            println!("Added {room} at {start} on {weekday}");
        }
        ScheduleAction::Show => {
            println!("{}", serde_json::to_string_pretty(&config.schedule)?);
        }
        ScheduleAction::Clear { day } => {
            match day {
                Some(day) => {
                    let weekday = super::parse_day(&day)?;
                    config.schedule.day_mut(weekday).clear();
                    println!("Cleared {weekday}");
                }
                None => {
                    config.schedule = Default::default();
                    println!("Cleared the week schedule");
                }
            }
            config.save()?;
        }
    }
    Ok(())
}
