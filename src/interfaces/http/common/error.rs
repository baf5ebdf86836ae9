//! BookingError → HTTP status mapping

use axum::http::StatusCode;
use axum::Json;
use tracing::error;

use super::ApiResponse;
use crate::domain::BookingError;

/// Error half of every handler's `Result`.
pub type ApiError<T> = (StatusCode, Json<ApiResponse<T>>);

pub fn status_for(err: &BookingError) -> StatusCode {
    match err {
        BookingError::InvalidDate { .. } | BookingError::Validation(_) => StatusCode::BAD_REQUEST,
        BookingError::NotFound { .. } => StatusCode::NOT_FOUND,
        BookingError::DatesUnavailable { .. }
        | BookingError::AlreadyCancelled { .. }
        | BookingError::ConcurrentUpdate { .. } => StatusCode::CONFLICT,
        BookingError::SerializationFailure(_)
        | BookingError::RetriesExhausted { .. }
        | BookingError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Build the error response. Infrastructure failures are logged and
/// reported with an opaque message.
pub fn error_response<T>(err: BookingError) -> ApiError<T> {
    let status = status_for(&err);
    let message = if err.is_internal() {
        error!(error = %err, "Request failed");
        "Internal server error".to_string()
    } else {
        err.to_string()
    };
    (status, Json(ApiResponse::error(message)))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use sea_orm::DbErr;

    use super::*;

    #[test]
    fn maps_outcomes_to_statuses() {
        let day = NaiveDate::from_ymd_opt(2006, 1, 2).unwrap();
        let cases = [
            (
                BookingError::InvalidDate {
                    field: "start_date",
                    value: "x".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (BookingError::Validation(vec![]), StatusCode::BAD_REQUEST),
            (BookingError::reservation_not_found("R-1"), StatusCode::NOT_FOUND),
            (
                BookingError::DatesUnavailable { start: day, end: day },
                StatusCode::CONFLICT,
            ),
            (
                BookingError::AlreadyCancelled {
                    reservation_id: "R-1".into(),
                },
                StatusCode::CONFLICT,
            ),
            (
                BookingError::ConcurrentUpdate {
                    reservation_id: "R-1".into(),
                },
                StatusCode::CONFLICT,
            ),
            (
                BookingError::RetriesExhausted {
                    operation: "insert reservation".into(),
                    attempts: 2,
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(status_for(&err), status, "{}", err);
        }
    }

    #[test]
    fn storage_errors_are_opaque() {
        let (status, Json(body)) = error_response::<()>(BookingError::Storage(DbErr::Custom(
            "password authentication failed for user app".into(),
        )));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.as_deref(), Some("Internal server error"));
    }

    #[test]
    fn conflicts_carry_their_message() {
        let day = NaiveDate::from_ymd_opt(2006, 1, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2006, 1, 4).unwrap();
        let (_, Json(body)) =
            error_response::<()>(BookingError::DatesUnavailable { start: day, end });
        assert_eq!(
            body.error.as_deref(),
            Some("Dates not available from 2006-01-02 to 2006-01-04")
        );
        assert!(!body.success);
    }
}
