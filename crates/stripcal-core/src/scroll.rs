#![forbid(unsafe_code)]

//! The boundary to the presentation layer's scroll primitive.
//!
//! Controllers drive scrolling exclusively through [`ScrollHost`]; the
//! presentation layer implements it over whatever list primitive it renders
//! with. Tests implement it with a fake that replays scripted
//! [`ViewportSnapshot`]s.

use crate::viewport::ViewportSnapshot;

/// Host-side scroll services consumed by the controllers.
///
/// Implementations are expected to be cheap to call on the UI thread; none
/// of these methods may block. The per-frame counterpart of this trait is
/// the host calling back into the controller once per rendered frame (see
/// `MonthGridState::on_frame` in `stripcal-widgets`), which is how a
/// centering attempt that found its target unmeasured gets resumed.
pub trait ScrollHost {
    /// Measurement of the currently laid-out items.
    fn viewport(&self) -> ViewportSnapshot;

    /// Immediately bring the item at `index` into view, without animation
    /// and without any anchor adjustment.
    fn scroll_to_index(&mut self, index: usize);

    /// Smoothly scroll so the item at `index` rests at `anchor_offset`
    /// pixels past the viewport's leading edge (see the
    /// [`viewport`](crate::viewport) module docs for the sign convention).
    fn animate_scroll_to_index(&mut self, index: usize, anchor_offset: i32);
}
