//! Interval value types and the `HH:MM` <-> minutes conversions.
//!
//! Busy intervals cross the crate boundary in zero-padded `HH:MM` form. All
//! arithmetic happens on [`FreeInterval`], which stores minutes since midnight
//! (`hour * 60 + minute`), so every valid `HH:MM` string round-trips exactly.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MutualError, Result};

/// Number of minutes in a day. Valid minute values are `0..MINUTES_PER_DAY`.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// An occupied block of time on a single day, in `HH:MM` form.
///
/// This is also the shape of the free windows handed back to callers by
/// [`crate::availability::AvailabilityContext::availability_for`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: String,
    pub end: String,
}

impl BusyInterval {
    /// Build a busy interval, validating both bounds and `start < end`.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Result<Self> {
        let interval = Self {
            start: start.into(),
            end: end.into(),
        };
        let minutes = interval.to_free()?;
        if minutes.start >= minutes.end {
            return Err(MutualError::InvalidInterval {
                start: interval.start,
                end: interval.end,
            });
        }
        Ok(interval)
    }

    /// Convert to the integer representation.
    pub fn to_free(&self) -> Result<FreeInterval> {
        Ok(FreeInterval {
            start: to_minutes(&self.start)?,
            end: to_minutes(&self.end)?,
        })
    }
}

impl fmt::Display for BusyInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// A busy interval tagged with the record it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: u64,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub interval: BusyInterval,
}

impl From<CalendarEvent> for BusyInterval {
    fn from(event: CalendarEvent) -> Self {
        event.interval
    }
}

/// A free window in minutes since midnight. `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FreeInterval {
    pub start: u32,
    pub end: u32,
}

impl FreeInterval {
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "free interval {start}..{end} is inverted");
        Self { start, end }
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// True for zero-width intervals, which appear when two busy blocks touch.
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Convert back to the `HH:MM` boundary form.
    pub fn to_busy(&self) -> Result<BusyInterval> {
        Ok(BusyInterval {
            start: to_hhmm(self.start)?,
            end: to_hhmm(self.end)?,
        })
    }
}

/// The daily bound inside which availability is computed.
///
/// Validated on construction; stored in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWorkingHours", into = "RawWorkingHours")]
pub struct WorkingHours {
    start: u32,
    end: u32,
}

#[derive(Serialize, Deserialize)]
struct RawWorkingHours {
    start: String,
    end: String,
}

impl WorkingHours {
    pub fn new(start: &str, end: &str) -> Result<Self> {
        let start_minutes = to_minutes(start)?;
        let end_minutes = to_minutes(end)?;
        if start_minutes >= end_minutes {
            return Err(MutualError::InvalidWorkingHours {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self {
            start: start_minutes,
            end: end_minutes,
        })
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// The whole working day as a single free interval.
    pub fn bounds(&self) -> FreeInterval {
        FreeInterval::new(self.start, self.end)
    }
}

/// 13:00-21:00 UTC.
impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start: 13 * 60,
            end: 21 * 60,
        }
    }
}

impl TryFrom<RawWorkingHours> for WorkingHours {
    type Error = MutualError;

    fn try_from(raw: RawWorkingHours) -> Result<Self> {
        Self::new(&raw.start, &raw.end)
    }
}

impl From<WorkingHours> for RawWorkingHours {
    fn from(hours: WorkingHours) -> Self {
        // Both bounds were validated on construction, so they are in range.
        let render = |m: u32| format!("{:02}:{:02}", m / 60, m % 60);
        Self {
            start: render(hours.start),
            end: render(hours.end),
        }
    }
}

impl fmt::Display for WorkingHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start / 60,
            self.start % 60,
            self.end / 60,
            self.end % 60
        )
    }
}

/// Parse a zero-padded `HH:MM` string into minutes since midnight.
///
/// # Errors
/// Returns `MutualError::InvalidTimeFormat` unless the input is exactly two
/// hour digits (`00`-`23`), a colon, and two minute digits (`00`-`59`).
pub fn to_minutes(time: &str) -> Result<u32> {
    let invalid = || MutualError::InvalidTimeFormat(time.to_string());

    let bytes = time.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(invalid());
    }
    let digit = |b: u8| -> Result<u32> {
        if b.is_ascii_digit() {
            Ok(u32::from(b - b'0'))
        } else {
            Err(invalid())
        }
    };
    let hour = digit(bytes[0])? * 10 + digit(bytes[1])?;
    let minute = digit(bytes[3])? * 10 + digit(bytes[4])?;
    if hour > 23 || minute > 59 {
        return Err(invalid());
    }
    Ok(hour * 60 + minute)
}

/// Render minutes since midnight as zero-padded `HH:MM`.
///
/// # Errors
/// Returns `MutualError::MinutesOutOfRange` for values past the end of the day.
pub fn to_hhmm(minutes: u32) -> Result<String> {
    if minutes >= MINUTES_PER_DAY {
        return Err(MutualError::MinutesOutOfRange(minutes));
    }
    Ok(format!("{:02}:{:02}", minutes / 60, minutes % 60))
}

/// Whether `a` lies entirely within `b`.
pub fn is_in_range(a: &FreeInterval, b: &FreeInterval) -> bool {
    b.start <= a.start && a.end <= b.end
}

/// Whether `point` falls within `interval`, inclusive on both ends.
pub fn is_in_between(point: u32, interval: &FreeInterval) -> bool {
    interval.start <= point && point <= interval.end
}
