//! Weekly schedule types.
//!
//! The schedule is produced by the editing surface and read-only to the
//! pipeline. Day sequences are kept in chronological order by the producer;
//! the resolver scans them as stored and does not re-sort.

mod resolver;

pub use resolver::{resolve, resolve_at, NO_ROOM};

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// One interval opening: the room occupied from `start_time` until the next
/// entry's start (or end of day).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub start_time: NaiveTime,
    pub room_code: String,
}

/// Per-weekday entry sequences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeekSchedule {
    #[serde(default)]
    pub monday: Vec<ScheduleEntry>,
    #[serde(default)]
    pub tuesday: Vec<ScheduleEntry>,
    #[serde(default)]
    pub wednesday: Vec<ScheduleEntry>,
    #[serde(default)]
    pub thursday: Vec<ScheduleEntry>,
    #[serde(default)]
    pub friday: Vec<ScheduleEntry>,
    #[serde(default)]
    pub saturday: Vec<ScheduleEntry>,
    #[serde(default)]
    pub sunday: Vec<ScheduleEntry>,
}

impl WeekSchedule {
    pub fn day(&self, weekday: Weekday) -> &[ScheduleEntry] {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    pub fn day_mut(&mut self, weekday: Weekday) -> &mut Vec<ScheduleEntry> {
        match weekday {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        }
    }

    /// All seven day sequences, Monday first.
    pub fn iter_days(&self) -> impl Iterator<Item = (Weekday, &[ScheduleEntry])> {
        [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .into_iter()
        .map(move |weekday| (weekday, self.day(weekday)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter_days().all(|(_, entries)| entries.is_empty())
    }
}
