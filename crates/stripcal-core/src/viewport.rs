#![forbid(unsafe_code)]

//! Scroll-axis viewport measurement and the centering computation.
//!
//! Controllers never measure anything themselves: the presentation layer
//! feeds a [`ViewportSnapshot`] of whatever it has currently laid out, and
//! the math here turns that into scroll targets. All quantities are in
//! pixels along the scroll axis (horizontal for a date strip, but nothing
//! here assumes an orientation).
//!
//! # Anchor offset convention
//!
//! An anchor offset of `n` passed to
//! [`ScrollHost::animate_scroll_to_index`](crate::scroll::ScrollHost::animate_scroll_to_index)
//! means: the item's leading edge comes to rest `n` pixels past the
//! viewport's leading edge. Negative values push the leading edge before
//! the viewport start (used when an item is larger than the viewport).
//! [`centering_anchor`] is defined against this convention and pinned by a
//! unit test; hosts adapting a scroll primitive with different semantics
//! convert at the [`ScrollHost`](crate::scroll::ScrollHost) boundary.

/// Position and extent of one laid-out item on the scroll axis.
///
/// `offset` is relative to the viewport's leading edge and may be negative
/// for items partially scrolled out of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemMetrics {
    /// Index of the item in the backing window.
    pub index: usize,
    /// Leading edge, in pixels from the viewport's leading edge.
    pub offset: i32,
    /// Extent along the scroll axis, in pixels.
    pub size: u32,
}

impl ItemMetrics {
    /// Create metrics for one item.
    #[must_use]
    pub const fn new(index: usize, offset: i32, size: u32) -> Self {
        Self {
            index,
            offset,
            size,
        }
    }

    /// Midpoint of the item on the scroll axis.
    #[inline]
    #[must_use]
    pub const fn center(&self) -> i32 {
        self.offset + (self.size as i32) / 2
    }
}

/// What the presentation layer currently has laid out.
///
/// Only items that are rendered and measured appear in `items`; an index
/// missing from the snapshot is off-screen or not yet laid out.
#[derive(Debug, Clone, Default)]
pub struct ViewportSnapshot {
    /// Viewport extent along the scroll axis, in pixels.
    pub length: u32,
    /// Metrics for the currently laid-out items.
    pub items: Vec<ItemMetrics>,
}

impl ViewportSnapshot {
    /// An empty snapshot with the given viewport length.
    #[must_use]
    pub const fn new(length: u32) -> Self {
        Self {
            length,
            items: Vec::new(),
        }
    }

    /// Add a measured item (builder).
    #[must_use]
    pub fn with_item(mut self, index: usize, offset: i32, size: u32) -> Self {
        self.items.push(ItemMetrics::new(index, offset, size));
        self
    }

    /// Metrics for the item at `index`, if it is laid out.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&ItemMetrics> {
        self.items.iter().find(|item| item.index == index)
    }

    /// Midpoint of the viewport.
    #[inline]
    #[must_use]
    pub const fn center(&self) -> i32 {
        (self.length as i32) / 2
    }
}

/// Signed distance from an item's center to the viewport's center.
///
/// Zero means the item is already centered; positive means the item sits
/// past the viewport's midpoint in scroll direction.
#[must_use]
pub fn center_delta(item: &ItemMetrics, viewport_length: u32) -> i32 {
    item.center() - (viewport_length as i32) / 2
}

/// The anchor offset that centers an item of `item_size` in a viewport of
/// `viewport_length` (see the module docs for the offset convention).
#[must_use]
pub fn centering_anchor(item_size: u32, viewport_length: u32) -> i32 {
    (viewport_length as i32) / 2 - (item_size as i32) / 2
}
