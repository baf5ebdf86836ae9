//! Campsite API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CampsiteDto, CreateCampsiteRequest, CreateCampsiteResponse, VacantDatesQuery,
    VacantDatesResponse,
};
use crate::application::{BookingService, CampsiteService};
use crate::interfaces::http::common::{error_response, ApiError, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct CampsiteAppState {
    pub campsites: Arc<CampsiteService>,
    pub booking: Arc<BookingService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/campsites",
    tag = "Campsites",
    responses(
        (status = 200, description = "All campsites ordered by code", body = ApiResponse<Vec<CampsiteDto>>)
    )
)]
pub async fn list_campsites(
    State(state): State<CampsiteAppState>,
) -> Result<Json<ApiResponse<Vec<CampsiteDto>>>, ApiError<Vec<CampsiteDto>>> {
    let campsites = state
        .campsites
        .list_campsites()
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        campsites.into_iter().map(CampsiteDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/campsites",
    tag = "Campsites",
    request_body = CreateCampsiteRequest,
    responses(
        (status = 201, description = "Campsite created", body = ApiResponse<CreateCampsiteResponse>),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_campsite(
    State(state): State<CampsiteAppState>,
    ValidatedJson(body): ValidatedJson<CreateCampsiteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreateCampsiteResponse>>), ApiError<CreateCampsiteResponse>>
{
    let campsite_id = state
        .campsites
        .create_campsite(body.into())
        .await
        .map_err(error_response)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CreateCampsiteResponse { campsite_id })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/campsites/{campsite_id}/vacant-dates",
    tag = "Campsites",
    params(
        ("campsite_id" = String, Path, description = "Campsite ID"),
        VacantDatesQuery
    ),
    responses(
        (status = 200, description = "Vacant dates in the window", body = ApiResponse<VacantDatesResponse>),
        (status = 400, description = "Malformed date, or a window that is empty, inverted (start_date >= end_date) or wider than the configured search window. An empty window is rejected rather than answered with an empty list.")
    )
)]
pub async fn vacant_dates(
    State(state): State<CampsiteAppState>,
    Path(campsite_id): Path<String>,
    Query(query): Query<VacantDatesQuery>,
) -> Result<Json<ApiResponse<VacantDatesResponse>>, ApiError<VacantDatesResponse>> {
    let dates = state
        .booking
        .find_vacant_dates(&campsite_id, &query.start_date, &query.end_date)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(VacantDatesResponse::new(
        campsite_id,
        dates,
    ))))
}
