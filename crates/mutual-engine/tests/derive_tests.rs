//! Tests for deriving free intervals from busy blocks.

use mutual_engine::derive::derive_free;
use mutual_engine::error::MutualError;
use mutual_engine::interval::{BusyInterval, FreeInterval, WorkingHours};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn busy(start: &str, end: &str) -> BusyInterval {
    BusyInterval::new(start, end).unwrap()
}

fn hours(start: &str, end: &str) -> WorkingHours {
    WorkingHours::new(start, end).unwrap()
}

fn render(free: &[FreeInterval]) -> Vec<String> {
    free.iter()
        .map(|f| f.to_busy().unwrap().to_string())
        .collect()
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[test]
fn single_block_splits_the_day() {
    // 09:00-17:00, busy 10:00-11:00 → 09:00-10:00, 11:00-17:00
    let free = derive_free(&[busy("10:00", "11:00")], &hours("09:00", "17:00")).unwrap();
    assert_eq!(render(&free), ["09:00 - 10:00", "11:00 - 17:00"]);
}

#[test]
fn no_blocks_means_whole_day_free() {
    let day = hours("13:00", "21:00");
    let free = derive_free(&[], &day).unwrap();
    assert_eq!(free, vec![day.bounds()]);
}

#[test]
fn block_at_day_start_leaves_no_leading_gap() {
    let free = derive_free(&[busy("09:00", "10:00")], &hours("09:00", "17:00")).unwrap();
    assert_eq!(render(&free), ["10:00 - 17:00"]);
}

#[test]
fn block_at_day_end_leaves_no_trailing_gap() {
    let free = derive_free(&[busy("16:00", "17:00")], &hours("09:00", "17:00")).unwrap();
    assert_eq!(render(&free), ["09:00 - 16:00"]);
}

#[test]
fn fully_booked_day_has_no_free_time() {
    let free = derive_free(&[busy("09:00", "17:00")], &hours("09:00", "17:00")).unwrap();
    assert!(free.is_empty());
}

#[test]
fn several_blocks_produce_every_gap() {
    let blocks = [
        busy("09:30", "10:00"),
        busy("12:00", "13:00"),
        busy("15:00", "16:00"),
    ];
    let free = derive_free(&blocks, &hours("09:00", "17:00")).unwrap();
    assert_eq!(
        render(&free),
        [
            "09:00 - 09:30",
            "10:00 - 12:00",
            "13:00 - 15:00",
            "16:00 - 17:00"
        ]
    );
}

#[test]
fn touching_blocks_yield_a_zero_width_gap() {
    let blocks = [busy("10:00", "11:00"), busy("11:00", "12:00")];
    let free = derive_free(&blocks, &hours("09:00", "17:00")).unwrap();
    assert_eq!(
        free,
        vec![
            FreeInterval::new(540, 600),
            FreeInterval::new(660, 660),
            FreeInterval::new(720, 1020),
        ]
    );
    assert!(free[1].is_degenerate());
}

#[test]
fn blocks_outside_working_hours_do_not_leak_gaps() {
    // Busy before and after the working day; the day itself is untouched.
    let blocks = [busy("07:00", "08:00"), busy("18:00", "19:00")];
    let free = derive_free(&blocks, &hours("09:00", "17:00")).unwrap();
    assert_eq!(render(&free), ["09:00 - 17:00"]);
}

#[test]
fn block_straddling_day_start_is_clipped() {
    let free = derive_free(&[busy("08:00", "10:00")], &hours("09:00", "17:00")).unwrap();
    assert_eq!(render(&free), ["10:00 - 17:00"]);
}

#[test]
fn free_and_busy_tile_the_working_day() {
    let day = hours("09:00", "17:00");
    let blocks = [
        busy("09:15", "10:00"),
        busy("10:00", "10:45"),
        busy("13:00", "14:00"),
    ];
    let free = derive_free(&blocks, &day).unwrap();

    let mut pieces: Vec<FreeInterval> = free.clone();
    pieces.extend(blocks.iter().map(|b| b.to_free().unwrap()));
    pieces.sort();

    let mut cursor = day.start();
    for piece in &pieces {
        assert_eq!(piece.start, cursor, "gap or overlap at {piece:?}");
        cursor = piece.end;
    }
    assert_eq!(cursor, day.end());
}

#[test]
fn malformed_busy_bound_is_reported() {
    let bad = BusyInterval {
        start: "10:00".to_string(),
        end: "11h".to_string(),
    };
    let err = derive_free(&[bad], &hours("09:00", "17:00")).unwrap_err();
    assert!(matches!(err, MutualError::InvalidTimeFormat(ref s) if s == "11h"));
}
