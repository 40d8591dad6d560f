//! Integration tests for the multi-frame centering loop.
//!
//! These tests drive `MonthGridState::scroll_to_month` against a scripted
//! fake host: the host replays one viewport snapshot per frame, simulating
//! a layout pipeline that measures the target only some frames after it
//! was scrolled into view. They validate that:
//!
//! - centering converges once layout catches up, across several frames
//! - the retry loop is bounded and abandons unmeasurable targets
//! - absent months never touch the scroll position
//! - centering uses the documented anchor-offset convention

use std::collections::VecDeque;

use chrono::NaiveDate;
use stripcal_core::{ScrollHost, ViewportSnapshot, centering_anchor};
use stripcal_widgets::month_grid::{CENTER_RETRY_LIMIT, MonthGridConfig, MonthGridState};
use tracing::{Level, info};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(Level::INFO)
        .try_init();
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn year_grid() -> MonthGridState {
    MonthGridState::new(
        MonthGridConfig::default()
            .with_start(ymd(2025, 1, 1))
            .with_end(ymd(2025, 12, 1)),
    )
    .unwrap()
}

/// Fake host replaying one scripted snapshot per frame.
struct ScriptedHost {
    frames: VecDeque<ViewportSnapshot>,
    jumped: Vec<usize>,
    animated: Vec<(usize, i32)>,
}

impl ScriptedHost {
    fn new(frames: impl IntoIterator<Item = ViewportSnapshot>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            jumped: Vec::new(),
            animated: Vec::new(),
        }
    }

    /// Drive `on_frame` until the pending attempt resolves or `budget`
    /// frames have elapsed. Returns the number of frames consumed.
    fn run_frames(&mut self, grid: &mut MonthGridState, budget: usize) -> usize {
        let mut frames = 0;
        while grid.has_pending_center() && frames < budget {
            self.advance();
            grid.on_frame(self);
            frames += 1;
        }
        frames
    }

    fn advance(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop_front();
        }
    }
}

impl ScrollHost for ScriptedHost {
    fn viewport(&self) -> ViewportSnapshot {
        self.frames.front().cloned().unwrap_or_default()
    }

    fn scroll_to_index(&mut self, index: usize) {
        self.jumped.push(index);
    }

    fn animate_scroll_to_index(&mut self, index: usize, anchor_offset: i32) {
        self.animated.push((index, anchor_offset));
    }
}

#[test]
fn centering_converges_when_layout_lags_three_frames() {
    init_tracing();
    let mut grid = year_grid();

    // Frame 0..=2: the target (index 10) is still unmeasured.
    // Frame 3: layout has caught up and measured it at [320, 400).
    let unmeasured = ViewportSnapshot::new(400).with_item(0, 0, 80);
    let measured = ViewportSnapshot::new(400)
        .with_item(9, 240, 80)
        .with_item(10, 320, 80);
    let mut host = ScriptedHost::new([
        unmeasured.clone(),
        unmeasured.clone(),
        unmeasured,
        measured,
    ]);

    grid.scroll_to_month(ymd(2025, 11, 20), &mut host);
    let frames = host.run_frames(&mut grid, 32);
    info!(frames, "centering resolved");

    assert_eq!(frames, 3);
    assert_eq!(host.animated, vec![(10, centering_anchor(80, 400))]);
    // One jump per frame that found the target unmeasured.
    assert_eq!(host.jumped, vec![10, 10, 10]);
    assert!(!grid.has_pending_center());
}

#[test]
fn centering_gives_up_on_a_never_measured_target() {
    init_tracing();
    let mut grid = year_grid();
    let mut host = ScriptedHost::new([ViewportSnapshot::new(400)]);

    grid.scroll_to_month(ymd(2025, 11, 20), &mut host);
    let frames = host.run_frames(&mut grid, 64);

    assert_eq!(frames, usize::from(CENTER_RETRY_LIMIT));
    assert!(host.animated.is_empty());
    assert!(
        host.jumped.len() <= usize::from(CENTER_RETRY_LIMIT) + 1,
        "runaway retry loop"
    );
}

#[test]
fn absent_month_leaves_scroll_and_selection_untouched() {
    init_tracing();
    let mut grid = year_grid();
    grid.select(ymd(2025, 6, 15));
    let mut host = ScriptedHost::new([ViewportSnapshot::new(400).with_item(0, 0, 80)]);

    grid.scroll_to_month(ymd(2030, 6, 15), &mut host);

    assert!(host.jumped.is_empty());
    assert!(host.animated.is_empty());
    assert_eq!(grid.selected(), Some(ymd(2025, 6, 15)));
    assert!(!grid.has_pending_center());
}

#[test]
fn measured_target_centers_without_waiting_for_a_frame() {
    init_tracing();
    let mut grid = year_grid();
    // Target index 5 measured at [40, 140) in a 500px viewport.
    let mut host = ScriptedHost::new([ViewportSnapshot::new(500).with_item(5, 40, 100)]);

    grid.scroll_to_month(ymd(2025, 6, 1), &mut host);

    assert_eq!(host.animated, vec![(5, centering_anchor(100, 500))]);
    assert_eq!(host.animated[0].1, 200);
    assert!(host.jumped.is_empty());
    assert!(!grid.has_pending_center());
}

#[test]
fn selecting_then_centering_is_the_grid_flow() {
    // The composed flow a month-selector row drives: pick a month, center
    // it, and let the selection stand independently of the scroll.
    init_tracing();
    let mut grid = year_grid();
    let mut host = ScriptedHost::new([ViewportSnapshot::new(400).with_item(3, 40, 80)]);

    let picked = ymd(2025, 4, 9);
    grid.select(picked);
    grid.scroll_to_month(picked, &mut host);

    assert_eq!(grid.selected(), Some(picked));
    assert_eq!(host.animated, vec![(3, 160)]);
    assert_eq!(grid.month_index(picked), Some(3));
}
