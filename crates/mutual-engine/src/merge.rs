//! Intersect free-interval sets across people.
//!
//! Both inputs are sorted, mutually non-overlapping interval lists. They are
//! first clamped to the overlap of their outer bounds, then intersected with a
//! two-pointer sweep that always advances whichever interval ends first.
//! Output is sorted and non-overlapping.

use std::cmp::Ordering;

use crate::interval::{is_in_between, is_in_range, FreeInterval};

/// Intersect an accumulated free set with the next person's free set.
///
/// An empty input on either side yields an empty result: nobody is free at the
/// same time, which is a valid outcome rather than an error.
pub fn intersect(accumulated: &[FreeInterval], next: &[FreeInterval]) -> Vec<FreeInterval> {
    let Some(range) = clamp_range(accumulated, next) else {
        return Vec::new();
    };

    let left = clip_to_range(accumulated, &range);
    let right = clip_to_range(next, &range);
    sweep(&left, &right)
}

/// Left-fold [`intersect`] over a sequence of free sets.
///
/// The first set is the initial accumulator. Stops early once nothing is left.
pub fn intersect_all<'a, I>(sets: I) -> Vec<FreeInterval>
where
    I: IntoIterator<Item = &'a [FreeInterval]>,
{
    let mut sets = sets.into_iter();
    let Some(first) = sets.next() else {
        return Vec::new();
    };

    let mut accumulated = first.to_vec();
    for next in sets {
        if accumulated.is_empty() {
            break;
        }
        accumulated = intersect(&accumulated, next);
    }
    accumulated
}

/// The coarse bound any intersection must fall within, or `None` if the two
/// sets cannot meet at all.
fn clamp_range(a: &[FreeInterval], b: &[FreeInterval]) -> Option<FreeInterval> {
    let start = a.first()?.start.max(b.first()?.start);
    let end = a.last()?.end.min(b.last()?.end);
    (start <= end).then(|| FreeInterval::new(start, end))
}

/// Drop intervals outside `range` and trim the ones straddling its edges.
///
/// Trimming never turns a real interval into a zero-width one; those are dropped.
fn clip_to_range(intervals: &[FreeInterval], range: &FreeInterval) -> Vec<FreeInterval> {
    intervals
        .iter()
        .filter_map(|interval| {
            if is_in_range(interval, range) {
                return Some(*interval);
            }
            let touches = is_in_between(range.start, interval) || is_in_between(interval.start, range);
            if !touches {
                return None;
            }
            let clipped = FreeInterval::new(
                interval.start.max(range.start),
                interval.end.min(range.end),
            );
            (!clipped.is_degenerate()).then_some(clipped)
        })
        .collect()
}

fn sweep(a: &[FreeInterval], b: &[FreeInterval]) -> Vec<FreeInterval> {
    let mut merged = Vec::with_capacity(a.len().max(b.len()));
    let (mut i, mut j) = (0, 0);

    while let (Some(x), Some(y)) = (a.get(i), b.get(j)) {
        if x == y {
            // Identical intervals, zero-width ones included, pass through once.
            merged.push(*x);
        } else {
            let start = x.start.max(y.start);
            let end = x.end.min(y.end);
            if start < end {
                merged.push(FreeInterval::new(start, end));
            }
        }

        match x.end.cmp(&y.end) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                i += 1;
                j += 1;
            }
        }
    }

    merged
}
