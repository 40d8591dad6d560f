#![forbid(unsafe_code)]

//! Calendar month arithmetic and date-window generation.
//!
//! The windowed collections in `stripcal-widgets` are sequences of either
//! individual days ([`chrono::NaiveDate`]) or month markers ([`MonthMarker`]).
//! This module owns the arithmetic that produces them: normalizing a day to
//! its month start, walking month-by-month with a retention cap, and
//! generating contiguous day runs around an anchor.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use stripcal_core::month::{MonthMarker, month_range};
//!
//! let jan = MonthMarker::from_ymd(2025, 1).unwrap();
//! let mar = MonthMarker::from_ymd(2025, 3).unwrap();
//!
//! let months = month_range(jan, mar, 120);
//! assert_eq!(months.len(), 3);
//! assert_eq!(months[0].first_day(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
//! ```

use chrono::{Datelike, Days, Months, NaiveDate};

/// A calendar month, identified by the first day of that month.
///
/// Equality and ordering compare year+month only; the wrapped date is always
/// normalized to day 1, so comparing markers is comparing their months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthMarker(NaiveDate);

impl MonthMarker {
    /// The month containing the given day.
    #[must_use]
    pub fn containing(day: NaiveDate) -> Self {
        // Day 1 exists in every month, so the fallback is unreachable.
        Self(day.with_day(1).unwrap_or(day))
    }

    /// Build a marker from a year and month number (1-12).
    ///
    /// Returns `None` for out-of-range months.
    #[must_use]
    pub fn from_ymd(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// Calendar year of this month.
    #[inline]
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month number, 1-12.
    #[inline]
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// First day of the month.
    #[inline]
    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// Number of days in the month (28-31, leap-aware).
    #[must_use]
    pub fn day_count(&self) -> u32 {
        match self.0.checked_add_months(Months::new(1)) {
            Some(next) => next.signed_duration_since(self.0).num_days() as u32,
            // chrono's calendar ceiling; December of the final year.
            None => 31,
        }
    }

    /// Last day of the month.
    #[must_use]
    pub fn last_day(&self) -> NaiveDate {
        self.0
            .checked_add_days(Days::new(u64::from(self.day_count() - 1)))
            .unwrap_or(self.0)
    }

    /// The following month, or `None` at the calendar ceiling.
    #[must_use]
    pub fn succ(&self) -> Option<Self> {
        self.0.checked_add_months(Months::new(1)).map(Self)
    }

    /// The preceding month, or `None` at the calendar floor.
    #[must_use]
    pub fn pred(&self) -> Option<Self> {
        self.0.checked_sub_months(Months::new(1)).map(Self)
    }

    /// Offset by a signed number of months.
    #[must_use]
    pub fn checked_add_months(&self, offset: i32) -> Option<Self> {
        let date = if offset >= 0 {
            self.0.checked_add_months(Months::new(offset.unsigned_abs()))
        } else {
            self.0.checked_sub_months(Months::new(offset.unsigned_abs()))
        };
        date.map(Self)
    }

    /// Whether the given day falls inside this month.
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        day.year() == self.year() && day.month() == self.month()
    }

    /// The month laid out as a 7-column, Monday-first grid.
    ///
    /// Leading `None` cells pad the first week so day 1 lands on the column
    /// matching its weekday; the remaining cells are the days of the month in
    /// order. The presentation layer chunks these into rows of 7.
    #[must_use]
    pub fn grid_cells(&self) -> Vec<Option<NaiveDate>> {
        let leading = self.0.weekday().num_days_from_monday() as usize;
        let days = self.day_count() as usize;
        let mut cells = Vec::with_capacity(leading + days);
        cells.resize(leading, None);
        cells.extend(self.0.iter_days().take(days).map(Some));
        cells
    }
}

/// Every month from `start` to `end` inclusive, in order.
///
/// Generation stops early once `cap` markers have been produced; a requested
/// range longer than the cap is silently truncated rather than rejected.
/// An inverted range yields an empty vector.
#[must_use]
pub fn month_range(start: MonthMarker, end: MonthMarker, cap: usize) -> Vec<MonthMarker> {
    let mut months = Vec::new();
    let mut cursor = Some(start);
    while let Some(month) = cursor {
        if month > end || months.len() >= cap {
            break;
        }
        months.push(month);
        cursor = month.succ();
    }
    months
}

/// A contiguous run of days centered on `anchor`, extending `before` days
/// back and `after` days forward.
///
/// Runs are clipped (not padded) at the calendar floor and ceiling.
#[must_use]
pub fn days_around(anchor: NaiveDate, before: u64, after: u64) -> Vec<NaiveDate> {
    let mut days = days_before(anchor, before as usize);
    days.push(anchor);
    days.extend(days_after(anchor, after as usize));
    days
}

/// Up to `count` consecutive days immediately preceding `first`, ascending.
///
/// Shorter than `count` only at the calendar floor.
#[must_use]
pub fn days_before(first: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(count);
    let mut cursor = first;
    for _ in 0..count {
        match cursor.pred_opt() {
            Some(day) => {
                days.push(day);
                cursor = day;
            }
            None => break,
        }
    }
    days.reverse();
    days
}

/// Up to `count` consecutive days immediately following `last`, ascending.
///
/// Shorter than `count` only at the calendar ceiling.
#[must_use]
pub fn days_after(last: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(count);
    let mut cursor = last;
    for _ in 0..count {
        match cursor.succ_opt() {
            Some(day) => {
                days.push(day);
                cursor = day;
            }
            None => break,
        }
    }
    days
}

/// Current date on the host clock, in the local timezone.
#[must_use]
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
