//! Derive one person's free intervals for a day from their busy blocks.
//!
//! The busy list is walked once. Gaps before the first block, between
//! consecutive blocks, and after the last block become free intervals, clipped
//! to the working-hours bound. Touching blocks yield a zero-width free interval;
//! the merger expects these.

use crate::error::Result;
use crate::interval::{BusyInterval, FreeInterval, WorkingHours};

/// Compute free intervals within `hours` given one person's busy blocks for a date.
///
/// `busy` must be sorted by start and non-overlapping. Overlaps are not merged
/// here; a gap that would come out inverted is dropped.
///
/// # Errors
/// Returns `MutualError::InvalidTimeFormat` if any busy bound is not `HH:MM`.
pub fn derive_free(busy: &[BusyInterval], hours: &WorkingHours) -> Result<Vec<FreeInterval>> {
    let blocks = busy
        .iter()
        .map(BusyInterval::to_free)
        .collect::<Result<Vec<_>>>()?;

    let (Some(first), Some(last)) = (blocks.first(), blocks.last()) else {
        // Nothing booked: the whole working day is free.
        return Ok(vec![hours.bounds()]);
    };

    let mut free = Vec::with_capacity(blocks.len() + 1);

    if first.start > hours.start() {
        push_gap(&mut free, hours.start(), first.start, hours);
    }

    for pair in blocks.windows(2) {
        push_gap(&mut free, pair[0].end, pair[1].start, hours);
    }

    if last.end < hours.end() {
        push_gap(&mut free, last.end, hours.end(), hours);
    }

    Ok(free)
}

/// Clip `[start, end)` to the working bound and keep it if anything is left.
///
/// Zero-width gaps inside the bound are kept as-is.
fn push_gap(free: &mut Vec<FreeInterval>, start: u32, end: u32, hours: &WorkingHours) {
    let clipped_start = start.max(hours.start());
    let clipped_end = end.min(hours.end());

    let touching = start == end && hours.start() <= start && start <= hours.end();
    if clipped_start < clipped_end || touching {
        free.push(FreeInterval::new(clipped_start, clipped_end));
    }
}
