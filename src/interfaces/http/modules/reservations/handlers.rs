//! Reservation HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::BookingService;
use crate::interfaces::http::common::{
    error_response, ApiError, ApiResponse, EmptyData, ValidatedJson,
};

use super::dto::*;

#[derive(Clone)]
pub struct ReservationAppState {
    pub booking: Arc<BookingService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = ApiResponse<CreateReservationResponse>),
        (status = 400, description = "Malformed dates or booking rule violated"),
        (status = 409, description = "Dates not available"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_reservation(
    State(state): State<ReservationAppState>,
    ValidatedJson(body): ValidatedJson<CreateReservationRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<CreateReservationResponse>>),
    ApiError<CreateReservationResponse>,
> {
    let reservation_id = state
        .booking
        .create_reservation(body.into())
        .await
        .map_err(error_response)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CreateReservationResponse { reservation_id })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/{reservation_id}",
    tag = "Reservations",
    params(("reservation_id" = String, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_reservation(
    State(state): State<ReservationAppState>,
    Path(reservation_id): Path<String>,
) -> Result<Json<ApiResponse<ReservationDto>>, ApiError<ReservationDto>> {
    let reservation = state
        .booking
        .find_reservation(&reservation_id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    patch,
    path = "/api/v1/reservations/{reservation_id}",
    tag = "Reservations",
    params(("reservation_id" = String, Path, description = "Reservation ID")),
    request_body = UpdateReservationRequest,
    responses(
        (status = 200, description = "Updated reservation", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Malformed dates or booking rule violated"),
        (status = 404, description = "Reservation not found"),
        (status = 409, description = "Dates not available, already cancelled, or modified concurrently")
    )
)]
pub async fn update_reservation(
    State(state): State<ReservationAppState>,
    Path(reservation_id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateReservationRequest>,
) -> Result<Json<ApiResponse<ReservationDto>>, ApiError<ReservationDto>> {
    let reservation = state
        .booking
        .update_reservation(body.into_command(reservation_id))
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/reservations/{reservation_id}",
    tag = "Reservations",
    params(("reservation_id" = String, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation cancelled", body = ApiResponse<EmptyData>),
        (status = 404, description = "Reservation not found"),
        (status = 409, description = "Already cancelled or modified concurrently")
    )
)]
pub async fn cancel_reservation(
    State(state): State<ReservationAppState>,
    Path(reservation_id): Path<String>,
) -> Result<Json<ApiResponse<EmptyData>>, ApiError<EmptyData>> {
    state
        .booking
        .cancel_reservation(&reservation_id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}
