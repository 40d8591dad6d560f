//! Property-based invariant tests for the windowed controllers.
//!
//! These tests verify invariants that must hold across any sequence of
//! load/select operations:
//!
//! 1. Date windows stay strictly increasing, duplicate-free, contiguous.
//! 2. Bounded date windows never exceed their retention cap; unbounded
//!    windows never shrink.
//! 3. Month windows stay strictly increasing, duplicate-free, contiguous
//!    by month, and never exceed `max_months`.
//! 4. Selection never mutates window contents.
//! 5. `reload_range` lands exactly on the requested endpoint months
//!    (unless truncated by the cap).

use chrono::NaiveDate;
use proptest::prelude::*;
use stripcal_widgets::date_strip::{DateStripConfig, DateStripState, LOAD_CHUNK};
use stripcal_widgets::month_grid::{MonthGridConfig, MonthGridState};

// ── Helpers ─────────────────────────────────────────────────────────────

fn day_strategy() -> impl Strategy<Value = NaiveDate> {
    (1990i32..2080, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| {
        NaiveDate::from_ymd_opt(y, m, d).expect("day <= 28 is always valid")
    })
}

#[derive(Debug, Clone, Copy)]
enum Op {
    LoadPrevious,
    LoadNext,
    Select,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::LoadPrevious),
        Just(Op::LoadNext),
        Just(Op::Select),
    ]
}

fn seed_run(anchor: NaiveDate, len: usize) -> Vec<NaiveDate> {
    anchor.iter_days().take(len).collect()
}

fn assert_contiguous_days(days: &[NaiveDate]) -> Result<(), TestCaseError> {
    for pair in days.windows(2) {
        prop_assert_eq!(
            pair[0].succ_opt(),
            Some(pair[1]),
            "window has a gap or inversion at {:?}",
            pair
        );
    }
    Ok(())
}

// ═════════════════════════════════════════════════════════════════════════
// 1. + 2. Date windows: ordering, contiguity, and bounds under any ops
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn date_window_invariants_under_ops(
        anchor in day_strategy(),
        seed_len in 1usize..50,
        max_days in 1usize..60,
        ops in prop::collection::vec(op_strategy(), 1..20),
    ) {
        let mut strip = DateStripState::new(
            DateStripConfig::default()
                .with_seed_days(seed_run(anchor, seed_len))
                .with_max_days(max_days),
        )
        .expect("non-zero max_days");
        let cap = 2 * max_days + 1;

        for op in &ops {
            match op {
                Op::LoadPrevious => strip.load_previous(),
                Op::LoadNext => strip.load_upcoming(),
                Op::Select => strip.select(anchor),
            }
            let days: Vec<_> = strip.iter().collect();
            assert_contiguous_days(&days)?;
            prop_assert!(days.len() <= cap.max(seed_len), "cap exceeded: {}", days.len());
            prop_assert!(days.len() >= seed_len.min(cap), "window shrank below seed");
        }
    }
}

proptest! {
    #[test]
    fn unbounded_date_window_never_shrinks(
        anchor in day_strategy(),
        ops in prop::collection::vec(op_strategy(), 1..12),
    ) {
        let mut strip = DateStripState::new(
            DateStripConfig::default()
                .bounded(false)
                .with_seed_days(seed_run(anchor, 3)),
        )
        .expect("unbounded config is always valid");

        let mut last_len = strip.len();
        for op in &ops {
            match op {
                Op::LoadPrevious => strip.load_previous(),
                Op::LoadNext => strip.load_upcoming(),
                Op::Select => strip.select(anchor),
            }
            prop_assert!(strip.len() >= last_len, "unbounded window shrank");
            if matches!(op, Op::LoadPrevious | Op::LoadNext) {
                prop_assert_eq!(strip.len(), last_len + LOAD_CHUNK);
            }
            last_len = strip.len();
            assert_contiguous_days(&strip.iter().collect::<Vec<_>>())?;
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Month windows: ordering, contiguity, and the retention cap
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn month_window_invariants_under_ops(
        start in day_strategy(),
        span in 0i64..36,
        max_months in 1usize..60,
        ops in prop::collection::vec(op_strategy(), 1..20),
    ) {
        let end = start
            .checked_add_months(chrono::Months::new(span as u32))
            .expect("span stays in range");
        let mut grid = MonthGridState::new(
            MonthGridConfig::default()
                .with_start(start)
                .with_end(end)
                .with_max_months(max_months),
        )
        .expect("start <= end by construction");

        for op in &ops {
            match op {
                Op::LoadPrevious => grid.load_previous_months(5).expect("count > 0"),
                Op::LoadNext => grid.load_next_months(5).expect("count > 0"),
                Op::Select => grid.select(start),
            }
            let months: Vec<_> = grid.iter().collect();
            prop_assert!(months.len() <= max_months, "cap exceeded");
            for pair in months.windows(2) {
                prop_assert!(pair[0] < pair[1], "not strictly increasing");
                prop_assert_eq!(pair[0].succ(), Some(pair[1]), "month gap");
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Selection never mutates window contents
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn selection_leaves_windows_untouched(
        anchor in day_strategy(),
        picks in prop::collection::vec(day_strategy(), 1..10),
    ) {
        let mut strip = DateStripState::new(
            DateStripConfig::default().with_seed_days(seed_run(anchor, 7)),
        )
        .expect("valid config");
        let mut grid = MonthGridState::new(
            MonthGridConfig::default().with_start(anchor).with_end(anchor),
        )
        .expect("valid config");

        let strip_before: Vec<_> = strip.iter().collect();
        let grid_before: Vec<_> = grid.iter().collect();
        for pick in &picks {
            strip.select(*pick);
            grid.select(*pick);
            prop_assert_eq!(strip.selected(), Some(*pick));
            prop_assert_eq!(grid.selected(), Some(*pick));
        }
        prop_assert_eq!(strip.iter().collect::<Vec<_>>(), strip_before);
        prop_assert_eq!(grid.iter().collect::<Vec<_>>(), grid_before);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. reload_range lands on the requested endpoint months
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn reload_range_endpoint_months(
        start in day_strategy(),
        span in 0i64..36,
        max_months in 1usize..60,
    ) {
        let end = start
            .checked_add_months(chrono::Months::new(span as u32))
            .expect("span stays in range");
        let mut grid = MonthGridState::new(
            MonthGridConfig::default().with_max_months(max_months),
        )
        .expect("valid config");

        grid.reload_range(start, end).expect("start <= end");

        let requested = span as usize + 1;
        let first = grid.first().expect("non-empty window");
        prop_assert!(first.contains(start), "window must start at start's month");
        if requested <= max_months {
            let last = grid.last().expect("non-empty window");
            prop_assert!(last.contains(end), "window must end at end's month");
            prop_assert_eq!(grid.len(), requested);
        } else {
            prop_assert_eq!(grid.len(), max_months);
        }
    }
}
