//! Property-based tests for free-interval derivation and intersection.
//!
//! These check the algebraic invariants for arbitrary sorted, non-overlapping
//! interval lists rather than hand-picked examples.

use mutual_engine::derive::derive_free;
use mutual_engine::interval::{to_hhmm, to_minutes, BusyInterval, FreeInterval, WorkingHours};
use mutual_engine::merge::{intersect, intersect_all};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Sorted, disjoint, non-empty intervals inside `[lo, hi]`, built from a set of
/// distinct cut points taken in pairs.
fn arb_disjoint(lo: u32, hi: u32) -> impl Strategy<Value = Vec<FreeInterval>> {
    prop::collection::btree_set(lo..=hi, 2..=12).prop_map(|cuts| {
        let cuts: Vec<u32> = cuts.into_iter().collect();
        cuts.chunks_exact(2)
            .map(|pair| FreeInterval::new(pair[0], pair[1]))
            .collect()
    })
}

fn arb_working_hours() -> impl Strategy<Value = (u32, u32)> {
    (0u32..=600, 660u32..=1439)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Every minute covered by a set, as a sorted list.
fn covered_minutes(set: &[FreeInterval]) -> Vec<u32> {
    let mut minutes: Vec<u32> = set.iter().flat_map(|iv| iv.start..iv.end).collect();
    minutes.sort_unstable();
    minutes.dedup();
    minutes
}

fn assert_sorted_disjoint(set: &[FreeInterval]) -> Result<(), TestCaseError> {
    for iv in set {
        prop_assert!(iv.start <= iv.end, "inverted interval {:?}", iv);
    }
    for pair in set.windows(2) {
        prop_assert!(pair[0].end <= pair[1].start, "overlap between {:?}", pair);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn hhmm_round_trips(minutes in 0u32..1440) {
        let text = to_hhmm(minutes).unwrap();
        prop_assert_eq!(to_minutes(&text).unwrap(), minutes);
    }

    #[test]
    fn free_and_busy_partition_the_working_day(
        (start, end) in arb_working_hours(),
        blocks in arb_disjoint(0, 1439),
    ) {
        let hours = WorkingHours::new(&to_hhmm(start).unwrap(), &to_hhmm(end).unwrap()).unwrap();
        // Keep only blocks inside the working day, as the tiling law requires.
        let busy: Vec<BusyInterval> = blocks
            .iter()
            .filter(|b| b.start >= start && b.end <= end)
            .map(|b| b.to_busy().unwrap())
            .collect();

        let free = derive_free(&busy, &hours).unwrap();
        assert_sorted_disjoint(&free)?;

        let mut pieces = free.clone();
        pieces.extend(busy.iter().map(|b| b.to_free().unwrap()));
        pieces.sort();

        let mut cursor = start;
        for piece in &pieces {
            prop_assert_eq!(piece.start, cursor);
            cursor = piece.end;
        }
        prop_assert_eq!(cursor, end);
    }

    #[test]
    fn derived_free_stays_within_working_hours(
        (start, end) in arb_working_hours(),
        blocks in arb_disjoint(0, 1439),
    ) {
        let hours = WorkingHours::new(&to_hhmm(start).unwrap(), &to_hhmm(end).unwrap()).unwrap();
        let busy: Vec<BusyInterval> = blocks.iter().map(|b| b.to_busy().unwrap()).collect();
        for iv in derive_free(&busy, &hours).unwrap() {
            prop_assert!(iv.start >= start && iv.end <= end, "{:?} escapes {}", iv, hours);
        }
    }

    #[test]
    fn self_intersection_keeps_content(x in arb_disjoint(0, 1439)) {
        let result = intersect(&x, &x);
        assert_sorted_disjoint(&result)?;
        prop_assert_eq!(covered_minutes(&result), covered_minutes(&x));
    }

    #[test]
    fn intersection_is_commutative_in_content(
        a in arb_disjoint(0, 1439),
        b in arb_disjoint(0, 1439),
    ) {
        prop_assert_eq!(
            covered_minutes(&intersect(&a, &b)),
            covered_minutes(&intersect(&b, &a))
        );
    }

    #[test]
    fn intersection_matches_minute_by_minute_overlap(
        a in arb_disjoint(0, 1439),
        b in arb_disjoint(0, 1439),
    ) {
        let result = intersect(&a, &b);
        assert_sorted_disjoint(&result)?;

        let in_b = covered_minutes(&b);
        let expected: Vec<u32> = covered_minutes(&a)
            .into_iter()
            .filter(|m| in_b.binary_search(m).is_ok())
            .collect();
        prop_assert_eq!(covered_minutes(&result), expected);
    }

    #[test]
    fn folding_copies_of_one_set_returns_it(
        x in arb_disjoint(0, 1439),
        copies in 1usize..6,
    ) {
        let sets = vec![x.as_slice(); copies];
        prop_assert_eq!(covered_minutes(&intersect_all(sets)), covered_minutes(&x));
    }
}
