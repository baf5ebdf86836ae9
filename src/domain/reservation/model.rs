//! Reservation domain entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::range::DateRange;

/// Version assigned to a freshly inserted reservation.
pub const INITIAL_VERSION: i32 = 1;

/// A claim on a campsite for the nights `[start_date, end_date)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reservation {
    /// Persistence ID (`None` until stored)
    #[serde(skip)]
    pub id: Option<i32>,
    /// Business ID exposed to clients
    pub reservation_id: String,
    pub campsite_id: String,
    pub email: String,
    pub full_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// `false` once cancelled; inactive reservations never conflict
    pub active: bool,
    /// Optimistic concurrency counter
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    pub fn new(
        reservation_id: impl Into<String>,
        campsite_id: impl Into<String>,
        email: impl Into<String>,
        full_name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            reservation_id: reservation_id.into(),
            campsite_id: campsite_id.into(),
            email: email.into(),
            full_name: full_name.into(),
            start_date,
            end_date,
            active: true,
            version: INITIAL_VERSION,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }

    /// Whether this reservation blocks `range` on `campsite_id`.
    pub fn conflicts_with(&self, campsite_id: &str, range: &DateRange) -> bool {
        self.active && self.campsite_id == campsite_id && self.range().overlaps(range)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reservation::range::parse_date;

    fn sample() -> Reservation {
        Reservation::new(
            "R-1",
            "CS-1",
            "john@example.com",
            "John Smith",
            parse_date("2006-01-02").unwrap(),
            parse_date("2006-01-04").unwrap(),
        )
    }

    #[test]
    fn new_reservation_is_active_at_version_one() {
        let r = sample();
        assert!(r.is_active());
        assert_eq!(r.version, INITIAL_VERSION);
        assert!(r.id.is_none());
        assert_eq!(r.range().nights(), 2);
    }

    #[test]
    fn conflicts_only_on_same_campsite_while_active() {
        let mut r = sample();
        let window = DateRange::new(
            parse_date("2006-01-03").unwrap(),
            parse_date("2006-01-05").unwrap(),
        );

        assert!(r.conflicts_with("CS-1", &window));
        assert!(!r.conflicts_with("CS-2", &window));

        r.active = false;
        assert!(!r.conflicts_with("CS-1", &window));
    }
}
