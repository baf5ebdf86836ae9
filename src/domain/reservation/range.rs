//! Half-open calendar date ranges and the overlap predicate
//!
//! A reservation occupies the nights `[start, end)`: the guest arrives on
//! `start` and leaves on `end`, so the `end` date itself is free for the
//! next arrival.

use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Date format used on every external boundary.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Half-open interval of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range without checking ordering. Ordering is a validation
    /// rule, not a structural one: an inverted range simply overlaps nothing.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// `true` when the range contains no date at all.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Number of nights covered (0 for empty or inverted ranges).
    pub fn nights(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            (self.end - self.start).num_days() as u64
        }
    }

    /// Two ranges conflict iff `max(starts) < min(ends)`.
    /// Touching ranges (`a.end == b.start`) do not conflict.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start.max(other.start) < self.end.min(other.end)
    }

    /// Every date in the range, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        std::iter::successors(Some(self.start), |d| d.checked_add_days(Days::new(1)))
            .take_while(move |d| *d < end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

/// Parse a `YYYY-MM-DD` string.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}
