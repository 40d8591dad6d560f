#![forbid(unsafe_code)]

//! Windowed calendar controllers for stripcal.
//!
//! Two controller state types back scrollable calendar surfaces:
//!
//! - [`DateStripState`] - an ordered window of individual days for a
//!   horizontally scrolling date strip, extended chunk-by-chunk at either
//!   edge.
//! - [`MonthGridState`] - an ordered window of month markers for a
//!   month-selector row plus day grid, with viewport-centered scrolling.
//!
//! Both are plain `&mut self` state machines owned by the presentation
//! layer: the renderer reads the current window and selection, reports
//! boundary crossings and frames back in, and implements
//! [`ScrollHost`](stripcal_core::ScrollHost) over its scroll primitive.
//! Change notification goes through an explicit [`Observers`] registry
//! rather than any framework-reactive state.

pub mod date_strip;
pub mod month_grid;
pub mod observe;

pub use date_strip::{DateStripConfig, DateStripState};
pub use month_grid::{MonthGridConfig, MonthGridState};
pub use observe::{CalendarEvent, ObserverId, Observers};

use bitflags::bitflags;

bitflags! {
    /// Which window edges are allowed to auto-load when scrolled to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LoadDirections: u8 {
        /// Loading past dates/months at the leading edge.
        const PREVIOUS = 0b01;
        /// Loading future dates/months at the trailing edge.
        const NEXT     = 0b10;
    }
}

impl Default for LoadDirections {
    fn default() -> Self {
        Self::all()
    }
}
