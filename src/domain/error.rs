//! Domain errors
//!
//! Every outcome a booking operation can end in, other than success, is one
//! variant of [`BookingError`] carrying its own payload.

use chrono::NaiveDate;
use sea_orm::DbErr;
use thiserror::Error;

use super::reservation::DATE_FORMAT;

#[derive(Debug, Error)]
pub enum BookingError {
    // ── Validation / input ────────────────────────────────────
    #[error("Invalid {field}: '{value}' is not a YYYY-MM-DD date")]
    InvalidDate { field: &'static str, value: String },

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    // ── Not found ─────────────────────────────────────────────
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    // ── Domain conflicts ──────────────────────────────────────
    #[error(
        "Dates not available from {} to {}",
        .start.format(DATE_FORMAT),
        .end.format(DATE_FORMAT)
    )]
    DatesUnavailable { start: NaiveDate, end: NaiveDate },

    #[error("Reservation already cancelled: {reservation_id}")]
    AlreadyCancelled { reservation_id: String },

    #[error("Reservation {reservation_id} was modified concurrently")]
    ConcurrentUpdate { reservation_id: String },

    // ── Infrastructure ────────────────────────────────────────
    /// The database could not serialize this transaction against a
    /// concurrent one. Transient: the whole transaction may be retried.
    #[error("Serialization failure: {0}")]
    SerializationFailure(#[source] DbErr),

    #[error("{operation}: retries exhausted after {attempts} attempts")]
    RetriesExhausted { operation: String, attempts: u32 },

    #[error("Database error: {0}")]
    Storage(#[source] DbErr),
}

impl BookingError {
    pub fn reservation_not_found(reservation_id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Reservation",
            id: reservation_id.into(),
        }
    }

    /// Whether retrying the same transaction may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::SerializationFailure(_))
    }

    /// Whether this is an infrastructure failure rather than an outcome the
    /// caller can act on.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::SerializationFailure(_) | Self::RetriesExhausted { .. } | Self::Storage(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_unavailable_reports_requested_range() {
        let err = BookingError::DatesUnavailable {
            start: NaiveDate::from_ymd_opt(2006, 1, 2).unwrap(),
            end: NaiveDate::from_ymd_opt(2006, 1, 4).unwrap(),
        };
        assert_eq!(err.to_string(), "Dates not available from 2006-01-02 to 2006-01-04");
        assert!(!err.is_transient());
        assert!(!err.is_internal());
    }

    #[test]
    fn serialization_failure_is_transient() {
        let err = BookingError::SerializationFailure(DbErr::Custom("40001".into()));
        assert!(err.is_transient());
        assert!(err.is_internal());
    }

    #[test]
    fn retries_exhausted_is_terminal() {
        let err = BookingError::RetriesExhausted {
            operation: "insert reservation".into(),
            attempts: 2,
        };
        assert!(!err.is_transient());
        assert!(err.is_internal());
        assert_eq!(err.to_string(), "insert reservation: retries exhausted after 2 attempts");
    }

    #[test]
    fn validation_joins_reasons() {
        let err = BookingError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "Validation failed: a; b");
    }
}
