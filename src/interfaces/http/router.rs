//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::FromRef, middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{BookingService, CampsiteService};
use crate::interfaces::http::common::{ApiResponse, EmptyData};
use crate::interfaces::http::modules::campsites::{self, CampsiteAppState};
use crate::interfaces::http::modules::health::{self, HealthState};
use crate::interfaces::http::modules::metrics::{
    http_metrics_middleware, prometheus_metrics, MetricsState,
};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::reservations::{self, ReservationAppState};

/// State shared by every `/api/v1` route. Handlers extract their own slice
/// of it through `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub booking: Arc<BookingService>,
    pub campsites: Arc<CampsiteService>,
}

impl FromRef<ApiState> for ReservationAppState {
    fn from_ref(s: &ApiState) -> Self {
        ReservationAppState {
            booking: Arc::clone(&s.booking),
        }
    }
}

impl FromRef<ApiState> for CampsiteAppState {
    fn from_ref(s: &ApiState) -> Self {
        CampsiteAppState {
            campsites: Arc::clone(&s.campsites),
            booking: Arc::clone(&s.booking),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        campsites::list_campsites,
        campsites::create_campsite,
        campsites::vacant_dates,
        reservations::create_reservation,
        reservations::get_reservation,
        reservations::update_reservation,
        reservations::cancel_reservation,
    ),
    components(
        schemas(
            ApiResponse<String>,
            EmptyData,
            health::HealthResponse,
            health::ComponentHealth,
            campsites::CampsiteDto,
            campsites::CreateCampsiteRequest,
            campsites::CreateCampsiteResponse,
            campsites::VacantDatesResponse,
            reservations::ReservationDto,
            reservations::CreateReservationRequest,
            reservations::CreateReservationResponse,
            reservations::UpdateReservationRequest,
        )
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Campsites", description = "Campsite catalog and availability"),
        (name = "Reservations", description = "Create, read, change and cancel reservations"),
    ),
    info(
        title = "Campgrounds Booking API",
        version = "1.0.0",
        description = "Campsite reservations without double booking",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    db: DatabaseConnection,
    booking: Arc<BookingService>,
    campsites: Arc<CampsiteService>,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let api_routes = Router::new()
        .route(
            "/api/v1/campsites",
            get(campsites::list_campsites).post(campsites::create_campsite),
        )
        .route(
            "/api/v1/campsites/{campsite_id}/vacant-dates",
            get(campsites::vacant_dates),
        )
        .route(
            "/api/v1/reservations",
            axum::routing::post(reservations::create_reservation),
        )
        .route(
            "/api/v1/reservations/{reservation_id}",
            get(reservations::get_reservation)
                .patch(reservations::update_reservation)
                .delete(reservations::cancel_reservation),
        )
        .with_state(ApiState { booking, campsites });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(HealthState {
            db,
            started_at: Arc::new(Instant::now()),
        });

    let metrics_routes = Router::new()
        .route("/metrics", get(prometheus_metrics))
        .with_state(MetricsState {
            handle: prometheus_handle,
        });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        // route_layer: runs after routing, so MatchedPath is available
        .route_layer(middleware::from_fn(http_metrics_middleware))
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
