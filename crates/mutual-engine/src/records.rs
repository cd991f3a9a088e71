//! Raw user and event records, and parsing events into calendar events.
//!
//! Records arrive as JSON arrays:
//!
//! ```json
//! [{ "id": 1, "name": "Maggie" }]
//! [{ "id": 7, "user_id": 1, "start_time": "2021-07-05T13:00:00", "end_time": "2021-07-05T13:30:00" }]
//! ```
//!
//! Timestamps are ISO-8601. Offsets are normalised to UTC; timestamps without
//! an offset are taken to be UTC already.

use chrono::{DateTime, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{MutualError, Result};
use crate::interval::{BusyInterval, CalendarEvent};

/// Accepted layouts for timestamps that carry no offset.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Last representable minute of a date.
const END_OF_DAY: &str = "23:59";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
}

/// A busy event as stored, before it is split into date and clock times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    pub id: u64,
    pub user_id: u64,
    pub start_time: String,
    pub end_time: String,
}

/// Parse a JSON array of users.
pub fn users_from_json(json: &str) -> Result<Vec<User>> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a JSON array of raw events.
pub fn events_from_json(json: &str) -> Result<Vec<RawEvent>> {
    Ok(serde_json::from_str(json)?)
}

/// Split a raw event into its date and `HH:MM` busy interval.
///
/// Clock times are truncated to the minute. An event ending at `00:00` on the
/// day after it starts is clipped to end at `23:59` on its start date.
///
/// # Errors
/// Returns `MutualError::InvalidEvent` if either timestamp is unparseable, the
/// event ends on any later date (other than at that midnight), or it does not
/// end after it starts at minute resolution.
pub fn parse_event(event: &RawEvent) -> Result<CalendarEvent> {
    let invalid = |reason: String| MutualError::InvalidEvent {
        id: event.id,
        reason,
    };

    let start = parse_timestamp(&event.start_time)
        .ok_or_else(|| invalid(format!("unparseable start_time {:?}", event.start_time)))?;
    let end = parse_timestamp(&event.end_time)
        .ok_or_else(|| invalid(format!("unparseable end_time {:?}", event.end_time)))?;

    let end_clock = if end.date() == start.date() {
        end.format("%H:%M").to_string()
    } else if ends_at_next_midnight(&start, &end) {
        END_OF_DAY.to_string()
    } else {
        return Err(invalid(format!(
            "spans more than one date ({} to {})",
            start.date(),
            end.date()
        )));
    };

    let interval = BusyInterval::new(start.format("%H:%M").to_string(), end_clock)
        .map_err(|_| invalid("does not end after it starts".to_string()))?;

    Ok(CalendarEvent {
        id: event.id,
        date: start.format("%Y-%m-%d").to_string(),
        interval,
    })
}

fn ends_at_next_midnight(start: &NaiveDateTime, end: &NaiveDateTime) -> bool {
    start.date().succ_opt() == Some(end.date()) && end.hour() == 0 && end.minute() == 0
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}
