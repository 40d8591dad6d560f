#![forbid(unsafe_code)]

//! Linear date window manager.
//!
//! Backs a horizontally scrolling strip of individual days. The window is
//! an ordered, contiguous run of dates extended chunk-by-chunk at either
//! edge as the user scrolls; in bounded mode the total length is capped
//! and growth at one edge trims the opposite edge.
//!
//! Boundary-crossing detection belongs to the renderer: it reports the
//! first/last visible index through [`DateStripState::on_visible_range`]
//! and the manager decides whether a load is due. This keeps windowing
//! policy out of the scroll-event plumbing.
//!
//! # Example
//!
//! ```
//! use stripcal_widgets::{DateStripConfig, DateStripState};
//!
//! let mut strip = DateStripState::new(DateStripConfig::default().bounded(false)).unwrap();
//! assert!(strip.selected().is_none());
//!
//! let first = strip.first().unwrap();
//! strip.load_previous();
//! assert!(strip.first().unwrap() < first);
//! ```

use std::collections::VecDeque;

use chrono::NaiveDate;
use stripcal_core::month;
use stripcal_core::{ScrollHost, WindowError};

use crate::LoadDirections;
use crate::observe::{CalendarEvent, ObserverId, Observers};

/// Days added per load request at either edge.
pub const LOAD_CHUNK: usize = 30;

/// Default per-side extent of a bounded window.
pub const DEFAULT_MAX_DAYS: usize = 365;

/// Default per-side extent of the initial window in unbounded mode.
pub const DEFAULT_UNBOUNDED_SPAN: usize = 30;

/// Construction options for [`DateStripState`].
#[derive(Debug, Clone)]
pub struct DateStripConfig {
    seed_days: Option<Vec<NaiveDate>>,
    bounded: bool,
    max_days: usize,
    unbounded_span: usize,
    directions: LoadDirections,
}

impl Default for DateStripConfig {
    fn default() -> Self {
        Self {
            seed_days: None,
            bounded: true,
            max_days: DEFAULT_MAX_DAYS,
            unbounded_span: DEFAULT_UNBOUNDED_SPAN,
            directions: LoadDirections::default(),
        }
    }
}

impl DateStripConfig {
    /// Seed the window with an explicit date sequence instead of generating
    /// one around today.
    ///
    /// The sequence is used verbatim; passing it ordered and duplicate-free
    /// is the caller's contract.
    #[must_use]
    pub fn with_seed_days(mut self, days: Vec<NaiveDate>) -> Self {
        self.seed_days = Some(days);
        self
    }

    /// Bounded mode caps the retained window at `max_days` per side of the
    /// initial anchor; unbounded mode grows without limit.
    #[must_use]
    pub fn bounded(mut self, bounded: bool) -> Self {
        self.bounded = bounded;
        self
    }

    /// Per-side cap used in bounded mode (total retention is
    /// `2 * max_days + 1`).
    #[must_use]
    pub fn with_max_days(mut self, max_days: usize) -> Self {
        self.max_days = max_days;
        self
    }

    /// Per-side extent of the generated initial window in unbounded mode.
    #[must_use]
    pub fn with_unbounded_span(mut self, span: usize) -> Self {
        self.unbounded_span = span;
        self
    }

    /// Which edges [`DateStripState::on_visible_range`] may auto-load.
    #[must_use]
    pub fn with_directions(mut self, directions: LoadDirections) -> Self {
        self.directions = directions;
        self
    }
}

/// Windowed day sequence with selection and edge loading.
#[derive(Debug)]
pub struct DateStripState {
    days: VecDeque<NaiveDate>,
    selected: Option<NaiveDate>,
    loading: bool,
    bounded: bool,
    max_days: usize,
    directions: LoadDirections,
    observers: Observers,
}

impl DateStripState {
    /// Build the initial window.
    ///
    /// An explicit seed is used verbatim; otherwise the window is generated
    /// centered on today, extending `max_days` per side when bounded or
    /// the unbounded span per side otherwise. Nothing is selected
    /// initially.
    ///
    /// # Errors
    ///
    /// [`WindowError::InvalidCapacity`] for a bounded config with
    /// `max_days == 0`.
    pub fn new(config: DateStripConfig) -> Result<Self, WindowError> {
        if config.bounded && config.max_days == 0 {
            return Err(WindowError::InvalidCapacity);
        }
        let days = match config.seed_days {
            Some(seed) => seed.into(),
            None => {
                let span = if config.bounded {
                    config.max_days
                } else {
                    config.unbounded_span
                };
                month::days_around(month::today(), span as u64, span as u64).into()
            }
        };
        Ok(Self {
            days,
            selected: None,
            loading: false,
            bounded: config.bounded,
            max_days: config.max_days,
            directions: config.directions,
            observers: Observers::new(),
        })
    }

    // ── Window access ───────────────────────────────────────────────────

    /// The windowed days, in order.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.iter().copied()
    }

    /// Day at `index`, if within the window.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<NaiveDate> {
        self.days.get(index).copied()
    }

    /// First windowed day.
    #[must_use]
    pub fn first(&self) -> Option<NaiveDate> {
        self.days.front().copied()
    }

    /// Last windowed day.
    #[must_use]
    pub fn last(&self) -> Option<NaiveDate> {
        self.days.back().copied()
    }

    /// Number of windowed days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether the window is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Currently selected day, which need not be in the window.
    #[must_use]
    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    /// Whether a load is in flight (guards re-entrant triggers).
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the window length is capped.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.bounded
    }

    /// The default first-visible index: the window midpoint, so the strip
    /// opens showing its anchor date.
    #[must_use]
    pub fn initial_center_index(&self) -> usize {
        (self.days.len() / 2).saturating_sub(1)
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

    /// Prepend a chunk of days before the current window start.
    ///
    /// No-op while a load is in flight, when the window is empty, or when
    /// a bounded window has reached its cap. In bounded mode the tail is
    /// trimmed to keep the total within the cap.
    pub fn load_previous(&mut self) {
        if self.loading || self.at_capacity() {
            return;
        }
        let Some(first) = self.first() else {
            return;
        };
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("load_previous", len = self.days.len()).entered();

        self.loading = true;
        self.observers.emit(CalendarEvent::LoadingChanged);

        let batch = month::days_before(first, LOAD_CHUNK);
        let added = batch.len();
        for day in batch.into_iter().rev() {
            self.days.push_front(day);
        }
        if self.bounded {
            while self.days.len() > self.capacity() {
                self.days.pop_back();
            }
        }

        self.loading = false;
        self.observers.emit(CalendarEvent::LoadingChanged);
        if added > 0 {
            self.observers.emit(CalendarEvent::WindowChanged);
        }
    }

    /// Append a chunk of days after the current window end.
    ///
    /// Mirror of [`Self::load_previous`]; in bounded mode the head is
    /// trimmed instead.
    pub fn load_upcoming(&mut self) {
        if self.loading || self.at_capacity() {
            return;
        }
        let Some(last) = self.last() else {
            return;
        };
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("load_upcoming", len = self.days.len()).entered();

        self.loading = true;
        self.observers.emit(CalendarEvent::LoadingChanged);

        let batch = month::days_after(last, LOAD_CHUNK);
        let added = batch.len();
        self.days.extend(batch);
        if self.bounded {
            while self.days.len() > self.capacity() {
                self.days.pop_front();
            }
        }

        self.loading = false;
        self.observers.emit(CalendarEvent::LoadingChanged);
        if added > 0 {
            self.observers.emit(CalendarEvent::WindowChanged);
        }
    }

    /// Select a day. Membership in the window is not required.
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

    /// Replace the window with a new explicit sequence.
    ///
    /// The selection is left alone (it was already allowed to point
    /// outside the window).
    pub fn reload(&mut self, days: Vec<NaiveDate>) {
        self.days = days.into();
        self.loading = false;
        self.observers.emit(CalendarEvent::WindowChanged);
    }

    // ── Scroll integration ──────────────────────────────────────────────

    /// Smoothly scroll to `day` if it is in the window; no-op otherwise.
    pub fn scroll_to_day(&mut self, day: NaiveDate, host: &mut dyn ScrollHost) {
        if let Some(index) = self.days.iter().position(|d| *d == day) {
            host.animate_scroll_to_index(index, 0);
        }
    }

    /// Boundary-crossing trigger, called by the renderer whenever the
    /// visible index range changes. Reaching the first item loads past
    /// days, reaching the last loads upcoming days, each gated by the
    /// configured directions.
    pub fn on_visible_range(&mut self, first_visible: usize, last_visible: usize) {
        if self.loading || self.days.is_empty() {
            return;
        }
        if first_visible == 0 && self.directions.contains(LoadDirections::PREVIOUS) {
            self.load_previous();
        } else if last_visible + 1 >= self.days.len()
            && self.directions.contains(LoadDirections::NEXT)
        {
            self.load_upcoming();
        }
    }

    fn capacity(&self) -> usize {
        self.max_days.saturating_mul(2).saturating_add(1)
    }

    fn at_capacity(&self) -> bool {
        self.bounded && self.days.len() >= self.capacity()
    }
}
