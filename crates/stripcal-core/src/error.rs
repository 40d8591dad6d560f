#![forbid(unsafe_code)]

//! Error type for degenerate controller inputs.
//!
//! Guard conditions (a load while one is in flight, a load past a window's
//! retention cap, centering on an absent month) are silent no-ops by
//! design. Errors are reserved for inputs that can never be meant: zero
//! counts, zero capacities, inverted ranges.

use std::fmt;

use chrono::NaiveDate;

/// A request the window managers reject outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowError {
    /// A load was requested with a count of zero.
    InvalidCount,
    /// A range was requested whose start falls after its end.
    InvalidRange {
        /// Requested range start.
        start: NaiveDate,
        /// Requested range end.
        end: NaiveDate,
    },
    /// A window was configured with a retention capacity of zero.
    InvalidCapacity,
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::InvalidCount => write!(f, "load count must be non-zero"),
            WindowError::InvalidRange { start, end } => {
                write!(f, "invalid range: start {start} is after end {end}")
            }
            WindowError::InvalidCapacity => write!(f, "window capacity must be non-zero"),
        }
    }
}

impl std::error::Error for WindowError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            WindowError::InvalidCount.to_string(),
            "load count must be non-zero"
        );
        let err = WindowError::InvalidRange {
            start: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "invalid range: start 2025-03-01 is after end 2025-01-01"
        );
    }
}
