#![forbid(unsafe_code)]

//! Core primitives for stripcal: calendar month arithmetic, date-window
//! generation, viewport measurement, and the centering computation.
//!
//! The controller state types live in `stripcal-widgets`; this crate holds
//! everything they share with the presentation layer: the date math that
//! produces windows, the [`ScrollHost`] boundary a renderer implements, and
//! the pixel arithmetic that turns a viewport measurement into a centered
//! scroll target.

pub mod error;
pub mod month;
pub mod scroll;
pub mod viewport;

pub use error::WindowError;
pub use month::MonthMarker;
pub use scroll::ScrollHost;
pub use viewport::{ItemMetrics, ViewportSnapshot, center_delta, centering_anchor};
