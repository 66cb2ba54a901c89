//! Wire and display timestamp handling.
//!
//! The backend emits naive `yyyy-MM-dd'T'HH:mm:ss.SSSSSS` timestamps pinned
//! to EST (UTC-05:00, fixed -- no DST). Display strings use the 12-hour
//! `h:mm a` shape with no leading zero. Both directions are pinned to the
//! same zone, so conversion is deterministic.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

/// Backend wire timestamp format.
pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Display timestamp format (`h:mm a`).
pub const DISPLAY_FORMAT: &str = "%-I:%M %p";

const BACKEND_OFFSET_SECS: i32 = -5 * 3600;

/// The pinned backend zone.
pub fn backend_zone() -> FixedOffset {
    FixedOffset::east_opt(BACKEND_OFFSET_SECS).expect("EST offset is within range")
}

/// Instant to naive wall-clock time in the backend zone.
pub fn in_backend_zone(at: DateTime<Utc>) -> NaiveDateTime {
    at.with_timezone(&backend_zone()).naive_local()
}

/// Parse a wire timestamp and reformat it for display.
///
/// The backend omits the fraction when it is zero, so both shapes parse.
/// Returns `None` for anything else.
pub fn wire_to_display(wire: &str) -> Option<String> {
    let parsed = NaiveDateTime::parse_from_str(wire, WIRE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(wire, "%Y-%m-%dT%H:%M:%S"))
        .ok()?;
    Some(parsed.format(DISPLAY_FORMAT).to_string())
}

/// Display timestamp for a locally raised alert.
pub fn display_at(at: DateTime<Utc>) -> String {
    in_backend_zone(at).format(DISPLAY_FORMAT).to_string()
}
