//! Schedule-to-room resolution.
//!
//! Pure lookup, safe to call on every classification cycle. Each entry opens
//! an interval that implicitly closes at the next entry's start; before the
//! first start of the day there is no current room.

use chrono::{Datelike, NaiveDateTime, NaiveTime, Weekday};

use super::WeekSchedule;

/// Sentinel room code for "no current room".
pub const NO_ROOM: &str = "NA";

/// Resolve the room occupied at `now`.
pub fn resolve(schedule: &WeekSchedule, now: NaiveDateTime) -> String {
    resolve_at(schedule, now.weekday(), now.time())
}

/// Resolve against an explicit weekday and time of day.
///
/// Scans the day's entries in stored order, holding the last entry whose
/// start is not after `time`. Entries sharing a start time: the later one in
/// sequence order wins.
pub fn resolve_at(schedule: &WeekSchedule, weekday: Weekday, time: NaiveTime) -> String {
    let mut room: Option<&str> = None;
    for entry in schedule.day(weekday) {
        if entry.start_time > time {
            break;
        }
        room = Some(&entry.room_code);
    }
    room.unwrap_or(NO_ROOM).to_string()
}
