//! Reservation date rules
//!
//! Each rule is a [`ReservationValidator`]. Services receive an explicit,
//! ordered list of them; [`apply`] runs all of them and collects every
//! failure message.

use chrono::{Months, NaiveDate};

use crate::domain::{BookingError, DateRange, DomainResult};

/// Tunable limits for what a guest may book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRules {
    /// Longest stay, in nights
    pub max_stay_days: u32,
    /// How far ahead the first night may be, in calendar months
    pub max_lead_months: u32,
}

impl Default for BookingRules {
    fn default() -> Self {
        Self {
            max_stay_days: 3,
            max_lead_months: 1,
        }
    }
}

pub trait ReservationValidator: Send + Sync {
    /// Check `range` as booked on `today`; `Err` carries a user-facing message.
    fn validate(&self, range: &DateRange, today: NaiveDate) -> Result<(), String>;
}

/// Arrival must come before departure.
pub struct StartBeforeEnd;

impl ReservationValidator for StartBeforeEnd {
    fn validate(&self, range: &DateRange, _today: NaiveDate) -> Result<(), String> {
        if range.start() < range.end() {
            Ok(())
        } else {
            Err("start date must be before end date".to_string())
        }
    }
}

/// Arrival must be after today and less than `months` ahead.
pub struct LeadTime {
    pub months: u32,
}

impl ReservationValidator for LeadTime {
    fn validate(&self, range: &DateRange, today: NaiveDate) -> Result<(), String> {
        let latest = today
            .checked_add_months(Months::new(self.months))
            .unwrap_or(NaiveDate::MAX);

        if range.start() > today && range.start() < latest {
            Ok(())
        } else {
            Err(format!(
                "start date must be after today and less than {} month(s) ahead",
                self.months
            ))
        }
    }
}

/// Stay must not exceed `days` nights.
pub struct MaxStay {
    pub days: u32,
}

impl ReservationValidator for MaxStay {
    fn validate(&self, range: &DateRange, _today: NaiveDate) -> Result<(), String> {
        if range.nights() <= u64::from(self.days) {
            Ok(())
        } else {
            Err(format!("stay must be at most {} night(s)", self.days))
        }
    }
}

/// The standard rule set, in evaluation order.
pub fn default_validators(rules: &BookingRules) -> Vec<Box<dyn ReservationValidator>> {
    vec![
        Box::new(StartBeforeEnd),
        Box::new(LeadTime {
            months: rules.max_lead_months,
        }),
        Box::new(MaxStay {
            days: rules.max_stay_days,
        }),
    ]
}

/// Run every validator; fail with all messages if any rejects.
pub fn apply(
    validators: &[Box<dyn ReservationValidator>],
    range: &DateRange,
    today: NaiveDate,
) -> DomainResult<()> {
    let errors: Vec<String> = validators
        .iter()
        .filter_map(|v| v.validate(range, today).err())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(BookingError::Validation(errors))
    }
}
