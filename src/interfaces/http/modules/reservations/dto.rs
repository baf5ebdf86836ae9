//! Reservation DTOs

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

use crate::application::{CreateReservation, UpdateReservation};
use crate::domain::reservation::DATE_FORMAT;
use crate::domain::Reservation;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    #[validate(length(min = 1, max = 64, message = "campsite_id must be 1-64 characters"))]
    pub campsite_id: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 255, message = "full_name must be 1-255 characters"))]
    pub full_name: String,
    /// First night (YYYY-MM-DD)
    pub start_date: String,
    /// Departure day, exclusive (YYYY-MM-DD)
    pub end_date: String,
}

impl From<CreateReservationRequest> for CreateReservation {
    fn from(r: CreateReservationRequest) -> Self {
        Self {
            campsite_id: r.campsite_id,
            email: r.email,
            full_name: r.full_name,
            start_date: r.start_date,
            end_date: r.end_date,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateReservationResponse {
    pub reservation_id: String,
}

/// Partial update; omitted or empty fields keep their stored value.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateReservationRequest {
    pub campsite_id: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Version the client last read; the update fails with 409 if the
    /// reservation has changed since
    pub version: Option<i32>,
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

// Empty strings mean "keep", so the derive rules (which reject "") do not fit.
impl Validate for UpdateReservationRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            if !email.validate_email() {
                errors.add("email", field_error("email", "must be a valid email address"));
            }
        }
        if self.full_name.as_deref().is_some_and(|n| n.len() > 255) {
            errors.add("full_name", field_error("length", "full_name must be at most 255 characters"));
        }
        if self.version.is_some_and(|v| v < 1) {
            errors.add("version", field_error("range", "version must be at least 1"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl UpdateReservationRequest {
    pub fn into_command(self, reservation_id: String) -> UpdateReservation {
        UpdateReservation {
            reservation_id,
            campsite_id: self.campsite_id,
            email: self.email,
            full_name: self.full_name,
            start_date: self.start_date,
            end_date: self.end_date,
            version: self.version,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationDto {
    pub reservation_id: String,
    pub campsite_id: String,
    pub email: String,
    pub full_name: String,
    pub start_date: String,
    pub end_date: String,
    pub active: bool,
    pub version: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        Self {
            start_date: r.start_date.format(DATE_FORMAT).to_string(),
            end_date: r.end_date.format(DATE_FORMAT).to_string(),
            created_at: r.created_at.to_rfc3339(),
            updated_at: r.updated_at.to_rfc3339(),
            reservation_id: r.reservation_id,
            campsite_id: r.campsite_id,
            email: r.email,
            full_name: r.full_name,
            active: r.active,
            version: r.version,
        }
    }
}
