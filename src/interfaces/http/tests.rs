//! End-to-end tests through the real router and an in-memory database.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{Days, Utc};
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::create_api_router;
use crate::application::{default_validators, BookingRules, BookingService, CampsiteService};
use crate::domain::reservation::DATE_FORMAT;
use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
use crate::infrastructure::database::test_support::migrated_db;
use crate::shared::RetryPolicy;

async fn app() -> Router {
    let db = migrated_db().await;
    let repos = Arc::new(SeaOrmRepositoryProvider::new(db.clone(), RetryPolicy::default()));
    let booking = Arc::new(BookingService::new(
        repos.clone(),
        default_validators(&BookingRules::default()),
    ));
    let campsites = Arc::new(CampsiteService::new(repos));
    let handle = PrometheusBuilder::new().build_recorder().handle();
    create_api_router(db, booking, campsites, handle)
}

fn day(n: u64) -> String {
    (Utc::now().date_naive() + Days::new(n))
        .format(DATE_FORMAT)
        .to_string()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn booking_body(campsite: &str, start: u64, end: u64) -> Value {
    json!({
        "campsite_id": campsite,
        "email": "john@example.com",
        "full_name": "John Smith",
        "start_date": day(start),
        "end_date": day(end),
    })
}

async fn create(app: &Router, campsite: &str, start: u64, end: u64) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/reservations",
        Some(booking_body(campsite, start, end)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"]["reservation_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_reports_database_ok() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"]["status"], "ok");
}

#[tokio::test]
async fn responses_echo_request_id() {
    let app = app().await;
    let req = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn reservation_lifecycle() {
    let app = app().await;
    let id = create(&app, "CS-1", 2, 4).await;

    let (status, body) = send(&app, "GET", &format!("/api/v1/reservations/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["start_date"], day(2));
    assert_eq!(body["data"]["end_date"], day(4));
    assert_eq!(body["data"]["version"], 1);
    assert_eq!(body["data"]["active"], true);

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/v1/reservations/{}", id),
        Some(json!({ "end_date": day(5), "version": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["end_date"], day(5));
    assert_eq!(body["data"]["version"], 2);

    let (status, _) = send(&app, "DELETE", &format!("/api/v1/reservations/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "DELETE", &format!("/api/v1/reservations/{}", id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn overlapping_booking_is_409_and_touching_is_201() {
    let app = app().await;
    create(&app, "CS-1", 2, 4).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/reservations",
        Some(booking_body("CS-1", 3, 5)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Dates not available"));

    create(&app, "CS-1", 4, 6).await;
}

#[tokio::test]
async fn stale_version_is_409() {
    let app = app().await;
    let id = create(&app, "CS-1", 2, 4).await;
    let uri = format!("/api/v1/reservations/{}", id);

    let (status, _) = send(&app, "PATCH", &uri, Some(json!({ "full_name": "Jane Smith" }))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "PATCH",
        &uri,
        Some(json!({ "full_name": "Jim Smith", "version": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(body["data"]["full_name"], "Jane Smith");
}

#[tokio::test]
async fn input_errors_map_to_400_and_422() {
    let app = app().await;

    // malformed date
    let mut body = booking_body("CS-1", 2, 4);
    body["start_date"] = json!("02/01/2006");
    let (status, _) = send(&app, "POST", "/api/v1/reservations", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // rule violation: stay too long
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/reservations",
        Some(booking_body("CS-1", 2, 10)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // field rule: bad email
    let mut body = booking_body("CS-1", 2, 4);
    body["email"] = json!("not-an-email");
    let (status, _) = send(&app, "POST", "/api/v1/reservations", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_reservation_is_404() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/api/v1/reservations/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn campsites_and_vacant_dates() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/campsites",
        Some(json!({ "campsite_code": "A-01", "capacity": 4, "fire_pit": true })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let campsite_id = body["data"]["campsite_id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "GET", "/api/v1/campsites", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["campsite_code"], "A-01");
    assert_eq!(body["data"][0]["fire_pit"], true);

    create(&app, &campsite_id, 2, 4).await;

    let uri = format!(
        "/api/v1/campsites/{}/vacant-dates?start_date={}&end_date={}",
        campsite_id,
        day(1),
        day(5)
    );
    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["vacant_dates"], json!([day(1), day(4)]));
}

#[tokio::test]
async fn invalid_campsite_is_422() {
    let app = app().await;
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/campsites",
        Some(json!({ "campsite_code": "", "capacity": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn vacant_dates_reject_inverted_and_oversized_windows() {
    let app = app().await;

    let uri = format!(
        "/api/v1/campsites/CS-1/vacant-dates?start_date={}&end_date={}",
        day(5),
        day(2)
    );
    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let uri = "/api/v1/campsites/CS-1/vacant-dates?start_date=0001-01-01&end_date=9999-12-31";
    let (status, _) = send(&app, "GET", uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn openapi_document_lists_every_route() {
    let app = app().await;
    let (status, doc) = send(&app, "GET", "/api-doc/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);

    for path in [
        "/health",
        "/api/v1/campsites",
        "/api/v1/campsites/{campsite_id}/vacant-dates",
        "/api/v1/reservations",
        "/api/v1/reservations/{reservation_id}",
    ] {
        assert!(doc["paths"].get(path).is_some(), "missing {}", path);
    }

    let vacant_400 = &doc["paths"]["/api/v1/campsites/{campsite_id}/vacant-dates"]["get"]
        ["responses"]["400"]["description"];
    assert!(vacant_400.as_str().unwrap().contains("empty list"));
}
