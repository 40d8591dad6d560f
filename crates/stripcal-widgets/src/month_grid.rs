#![forbid(unsafe_code)]

//! Grid month window manager.
//!
//! Backs a month-selector row (and the day grid for whichever month is
//! active). The window is an ordered, contiguous run of month markers
//! capped at `max_months`: once the cap is reached, further load requests
//! silently drop the overflow rather than evicting the opposite end, so a
//! grid never loses months it already showed.
//!
//! Centering a month in the viewport is a cooperative multi-frame affair:
//! if the target item is already measured, one animated scroll does it;
//! if not, the manager issues a plain scroll-into-view and retries the
//! centering computation when the host reports the next frame through
//! [`MonthGridState::on_frame`], up to [`CENTER_RETRY_LIMIT`] frames.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use stripcal_widgets::{MonthGridConfig, MonthGridState};
//!
//! let config = MonthGridConfig::default()
//!     .with_start(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
//!     .with_end(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
//! let grid = MonthGridState::new(config).unwrap();
//! assert_eq!(grid.len(), 3);
//! ```

use std::collections::VecDeque;

use chrono::NaiveDate;
use stripcal_core::month::{self, MonthMarker, month_range};
use stripcal_core::{ScrollHost, WindowError, center_delta, centering_anchor};

use crate::LoadDirections;
use crate::observe::{CalendarEvent, ObserverId, Observers};

/// Months added per load request when none is specified.
pub const DEFAULT_LOAD_COUNT: usize = 12;

/// Default retention cap for the month window.
pub const DEFAULT_MAX_MONTHS: usize = 120;

/// Default range extent around the current month, per side.
pub const DEFAULT_SPAN_MONTHS: i32 = 12;

/// How many frames an unmeasured centering target is retried before the
/// attempt is abandoned.
pub const CENTER_RETRY_LIMIT: u8 = 8;

/// Construction options for [`MonthGridState`].
#[derive(Debug, Clone)]
pub struct MonthGridConfig {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    max_months: usize,
    directions: LoadDirections,
}

impl Default for MonthGridConfig {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
            max_months: DEFAULT_MAX_MONTHS,
            directions: LoadDirections::default(),
        }
    }
}

impl MonthGridConfig {
    /// First month of the initial range (any day within it). Defaults to
    /// the current month minus [`DEFAULT_SPAN_MONTHS`].
    #[must_use]
    pub fn with_start(mut self, start: NaiveDate) -> Self {
        self.start = Some(start);
        self
    }

    /// Last month of the initial range (any day within it). Defaults to
    /// the current month plus [`DEFAULT_SPAN_MONTHS`].
    #[must_use]
    pub fn with_end(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }

    /// Retention cap; generation and loads never push the window past it.
    #[must_use]
    pub fn with_max_months(mut self, max_months: usize) -> Self {
        self.max_months = max_months;
        self
    }

    /// Which edges may load more months.
    #[must_use]
    pub fn with_directions(mut self, directions: LoadDirections) -> Self {
        self.directions = directions;
        self
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingCenter {
    index: usize,
    retries_left: u8,
}

/// Windowed month sequence with selection, bounded loading, and
/// viewport-centered scrolling.
#[derive(Debug)]
pub struct MonthGridState {
    months: VecDeque<MonthMarker>,
    selected: Option<NaiveDate>,
    loading: bool,
    max_months: usize,
    directions: LoadDirections,
    pending_center: Option<PendingCenter>,
    observers: Observers,
}

impl MonthGridState {
    /// Generate the initial month window from the configured range,
    /// truncating silently once `max_months` markers exist. Callers that
    /// need the full range guaranteed must size `max_months` accordingly.
    ///
    /// # Errors
    ///
    /// [`WindowError::InvalidCapacity`] when `max_months == 0`;
    /// [`WindowError::InvalidRange`] when the start month falls after the
    /// end month.
    pub fn new(config: MonthGridConfig) -> Result<Self, WindowError> {
        if config.max_months == 0 {
            return Err(WindowError::InvalidCapacity);
        }
        let current = MonthMarker::containing(month::today());
        let start = config.start.map_or_else(
            || current.checked_add_months(-DEFAULT_SPAN_MONTHS).unwrap_or(current),
            MonthMarker::containing,
        );
        let end = config.end.map_or_else(
            || current.checked_add_months(DEFAULT_SPAN_MONTHS).unwrap_or(current),
            MonthMarker::containing,
        );
        if start > end {
            return Err(WindowError::InvalidRange {
                start: start.first_day(),
                end: end.first_day(),
            });
        }
        Ok(Self {
            months: month_range(start, end, config.max_months).into(),
            selected: None,
            loading: false,
            max_months: config.max_months,
            directions: config.directions,
            pending_center: None,
            observers: Observers::new(),
        })
    }

    // ── Window access ───────────────────────────────────────────────────

    /// The windowed months, in order.
    pub fn iter(&self) -> impl Iterator<Item = MonthMarker> + '_ {
        self.months.iter().copied()
    }

    /// Month at `index`, if within the window.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<MonthMarker> {
        self.months.get(index).copied()
    }

    /// First windowed month.
    #[must_use]
    pub fn first(&self) -> Option<MonthMarker> {
        self.months.front().copied()
    }

    /// Last windowed month.
    #[must_use]
    pub fn last(&self) -> Option<MonthMarker> {
        self.months.back().copied()
    }

    /// Number of windowed months.
    #[must_use]
    pub fn len(&self) -> usize {
        self.months.len()
    }

    /// Whether the window is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Currently selected day, which need not fall in any windowed month.
    #[must_use]
    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    /// Whether a load is in flight (guards re-entrant triggers).
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The retention cap.
    #[must_use]
    pub fn max_months(&self) -> usize {
        self.max_months
    }

    /// Whether a centering attempt is waiting on a frame.
    #[must_use]
    pub fn has_pending_center(&self) -> bool {
        self.pending_center.is_some()
    }

    /// Index of the window month containing `day`, by year+month equality.
    #[must_use]
    pub fn month_index(&self, day: NaiveDate) -> Option<usize> {
        self.months.iter().position(|m| m.contains(day))
    }

    // ── Observers ───────────────────────────────────────────────────────

    /// Register a change observer.
    pub fn subscribe(&mut self, callback: impl FnMut(CalendarEvent) + 'static) -> ObserverId {
        self.observers.subscribe(callback)
    }

    /// Remove a change observer.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    // ── Mutations ───────────────────────────────────────────────────────

    /// Append up to `count` consecutive months after the window end.
    ///
    /// Silent no-op when the `NEXT` direction is disabled, a load is in
    /// flight, or the window is empty. Months past `max_months` are
    /// dropped, not exchanged for older ones: once the cap is hit this
    /// method has no further effect.
    ///
    /// # Errors
    ///
    /// [`WindowError::InvalidCount`] when `count == 0`.
    pub fn load_next_months(&mut self, count: usize) -> Result<(), WindowError> {
        if count == 0 {
            return Err(WindowError::InvalidCount);
        }
        if !self.directions.contains(LoadDirections::NEXT) || self.loading {
            return Ok(());
        }
        let Some(last) = self.last() else {
            return Ok(());
        };
        #[cfg(feature = "tracing")]
        let _span =
            tracing::debug_span!("load_next_months", count, len = self.months.len()).entered();

        self.loading = true;
        self.observers.emit(CalendarEvent::LoadingChanged);

        let mut cursor = last;
        let mut added = 0;
        for _ in 0..count {
            if self.months.len() >= self.max_months {
                break;
            }
            let Some(next) = cursor.succ() else { break };
            self.months.push_back(next);
            cursor = next;
            added += 1;
        }

        self.loading = false;
        self.observers.emit(CalendarEvent::LoadingChanged);
        if added > 0 {
            self.observers.emit(CalendarEvent::WindowChanged);
        }
        Ok(())
    }

    /// Prepend up to `count` consecutive months before the window start.
    ///
    /// Mirror of [`Self::load_next_months`], gated on the `PREVIOUS`
    /// direction. An in-flight centering attempt is re-aimed so it still
    /// targets the same month after indices shift.
    ///
    /// # Errors
    ///
    /// [`WindowError::InvalidCount`] when `count == 0`.
    pub fn load_previous_months(&mut self, count: usize) -> Result<(), WindowError> {
        if count == 0 {
            return Err(WindowError::InvalidCount);
        }
        if !self.directions.contains(LoadDirections::PREVIOUS) || self.loading {
            return Ok(());
        }
        let Some(first) = self.first() else {
            return Ok(());
        };
        #[cfg(feature = "tracing")]
        let _span =
            tracing::debug_span!("load_previous_months", count, len = self.months.len()).entered();

        self.loading = true;
        self.observers.emit(CalendarEvent::LoadingChanged);

        let mut cursor = first;
        let mut added = 0;
        for _ in 0..count {
            if self.months.len() >= self.max_months {
                break;
            }
            let Some(prev) = cursor.pred() else { break };
            self.months.push_front(prev);
            cursor = prev;
            added += 1;
        }
        if let Some(pending) = &mut self.pending_center {
            pending.index += added;
        }

        self.loading = false;
        self.observers.emit(CalendarEvent::LoadingChanged);
        if added > 0 {
            self.observers.emit(CalendarEvent::WindowChanged);
        }
        Ok(())
    }

    /// Discard the window and regenerate it for a new range, using the
    /// same truncation rules as construction. Cancels any pending
    /// centering attempt.
    ///
    /// # Errors
    ///
    /// [`WindowError::InvalidRange`] when `start`'s month falls after
    /// `end`'s month.
    pub fn reload_range(&mut self, start: NaiveDate, end: NaiveDate) -> Result<(), WindowError> {
        let start_marker = MonthMarker::containing(start);
        let end_marker = MonthMarker::containing(end);
        if start_marker > end_marker {
            return Err(WindowError::InvalidRange { start, end });
        }
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("reload_range", len = self.months.len()).entered();

        self.loading = true;
        self.observers.emit(CalendarEvent::LoadingChanged);

        self.months.clear();
        self.months
            .extend(month_range(start_marker, end_marker, self.max_months));
        self.pending_center = None;

        self.loading = false;
        self.observers.emit(CalendarEvent::LoadingChanged);
        self.observers.emit(CalendarEvent::WindowChanged);
        Ok(())
    }

    /// Select a day. Membership in a windowed month is not required.
    pub fn select(&mut self, day: NaiveDate) {
        self.selected = Some(day);
        self.observers.emit(CalendarEvent::SelectionChanged);
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        if self.selected.take().is_some() {
            self.observers.emit(CalendarEvent::SelectionChanged);
        }
    }

    /// Boundary-crossing trigger, called by the renderer whenever the
    /// visible index range of the month row changes. Loads
    /// [`DEFAULT_LOAD_COUNT`] months at the crossed edge.
    pub fn on_visible_range(&mut self, first_visible: usize, last_visible: usize) {
        if self.loading || self.months.is_empty() {
            return;
        }
        if first_visible == 0 && self.directions.contains(LoadDirections::PREVIOUS) {
            // Count is non-zero by construction.
            let _ = self.load_previous_months(DEFAULT_LOAD_COUNT);
        } else if last_visible + 1 >= self.months.len()
            && self.directions.contains(LoadDirections::NEXT)
        {
            let _ = self.load_next_months(DEFAULT_LOAD_COUNT);
        }
    }

    // ── Centering ───────────────────────────────────────────────────────

    /// Smoothly scroll the month containing `target` to the viewport's
    /// center. A month absent from the window is a silent no-op.
    ///
    /// If the item is not yet measured, it is first scrolled into view
    /// and the centering computation is retried on following frames via
    /// [`Self::on_frame`].
    pub fn scroll_to_month(&mut self, target: NaiveDate, host: &mut dyn ScrollHost) {
        let Some(index) = self.month_index(target) else {
            return;
        };
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("scroll_to_month", index).entered();

        self.pending_center = None;
        self.center_attempt(index, CENTER_RETRY_LIMIT, host);
    }

    /// Per-frame tick, called by the host once after each rendered frame.
    /// Resumes at most one pending centering attempt.
    pub fn on_frame(&mut self, host: &mut dyn ScrollHost) {
        let Some(pending) = self.pending_center.take() else {
            return;
        };
        // The window may have been reloaded out from under the attempt.
        if pending.index >= self.months.len() {
            return;
        }
        self.center_attempt(pending.index, pending.retries_left - 1, host);
    }

    fn center_attempt(&mut self, index: usize, retries_left: u8, host: &mut dyn ScrollHost) {
        let snapshot = host.viewport();
        if let Some(item) = snapshot.item(index) {
            if center_delta(item, snapshot.length) != 0 {
                host.animate_scroll_to_index(index, centering_anchor(item.size, snapshot.length));
            }
            self.pending_center = None;
        } else if retries_left == 0 {
            self.pending_center = None;
        } else {
            host.scroll_to_index(index);
            self.pending_center = Some(PendingCenter {
                index,
                retries_left,
            });
        }
    }
}
