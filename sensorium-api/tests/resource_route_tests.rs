//! End-to-end tests for the resource CRUD routes.

use axum::http::{Method, StatusCode};
use sensorium_api::{create_test_router, AppState};
use sensorium_test_utils::fixtures;
use serde_json::json;

#[path = "support/http.rs"]
mod http_support;

use http_support::{
    assert_envelope, delete, get as get_request, json_request, raw_json_request, send, send_json,
};

fn app() -> axum::Router {
    create_test_router(AppState::new(fixtures::open_unit()))
}

async fn create_sensor(app: &axum::Router, name: &str) -> serde_json::Value {
    let (status, json) = send_json(
        app,
        json_request(
            Method::POST,
            "/api/v1/sensors",
            &json!({ "name": name, "kind": "VIBRATION", "location": "line 4" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {json}");
    json
}

#[tokio::test]
async fn sensor_crud_round() {
    let app = app();
    let sensor = create_sensor(&app, "press-1").await;
    let id = sensor["sensor_id"].as_str().expect("id").to_string();
    assert_eq!(sensor["status"], "ACTIVE");

    let (status, fetched) = send_json(&app, get_request(&format!("/api/v1/sensors/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "press-1");

    let (status, updated) = send_json(
        &app,
        json_request(
            Method::PUT,
            &format!("/api/v1/sensors/{id}"),
            &json!({ "status": "MAINTENANCE" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "MAINTENANCE");
    assert_eq!(updated["name"], "press-1");

    let (status, listed) = send_json(&app, get_request("/api/v1/sensors")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["total"], 1);
    assert_eq!(listed["items"][0]["status"], "MAINTENANCE");

    let (status, _) = send(&app, delete(&format!("/api/v1/sensors/{id}"))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, json) = send_json(&app, get_request(&format!("/api/v1/sensors/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_envelope(&json, "Not Found");
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let app = app();
    let id = sensorium_core::new_entity_id();

    let (status, json) = send_json(&app, get_request(&format!("/api/v1/solutions/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_envelope(&json, "Not Found");

    let (status, _) = send(&app, delete(&format!("/api/v1/analyses/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        json_request(Method::PUT, &format!("/api/v1/requests/{id}"), &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_input_is_bad_request() {
    let app = app();

    let (status, json) = send_json(
        &app,
        raw_json_request(Method::POST, "/api/v1/sensors", "{ not json"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_envelope(&json, "Bad Request");

    let (status, json) = send_json(
        &app,
        json_request(Method::POST, "/api/v1/sensors", &json!({ "name": "x", "kind": "SEISMIC" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_envelope(&json, "Bad Request");

    let (status, json) = send_json(
        &app,
        json_request(Method::POST, "/api/v1/sensors", &json!({ "name": "  ", "kind": "OPTICAL" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_envelope(&json, "Bad Request");

    let (status, json) = send_json(&app, get_request("/api/v1/sensors/not-a-uuid")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_envelope(&json, "Bad Request");
}

#[tokio::test]
async fn child_requires_existing_parent() {
    let app = app();
    let missing = sensorium_core::new_entity_id();

    let (status, json) = send_json(
        &app,
        json_request(
            Method::POST,
            "/api/v1/analyses",
            &json!({ "sensor_id": missing, "summary": "orphan" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_envelope(&json, "Not Found");

    let (status, _) = send(&app, get_request(&format!("/api/v1/sensors/{missing}/analyses"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn workflow_children_are_listed() {
    let app = app();
    let sensor = create_sensor(&app, "boiler").await;
    let sensor_id = sensor["sensor_id"].as_str().expect("sensor id").to_string();

    let (status, analysis) = send_json(
        &app,
        json_request(
            Method::POST,
            "/api/v1/analyses",
            &json!({ "sensor_id": sensor_id, "summary": "Pressure oscillation" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let analysis_id = analysis["analysis_id"].as_str().expect("analysis id").to_string();

    let (status, request) = send_json(
        &app,
        json_request(
            Method::POST,
            "/api/v1/requests",
            &json!({
                "analysis_id": analysis_id,
                "subject": "Inspect valve",
                "body": "Oscillation at 4Hz",
                "priority": "CRITICAL"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let request_id = request["request_id"].as_str().expect("request id").to_string();

    let (status, _) = send(
        &app,
        json_request(
            Method::POST,
            "/api/v1/responses",
            &json!({ "request_id": request_id, "body": "On site tomorrow", "responder": "field-team" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        json_request(
            Method::POST,
            "/api/v1/solutions",
            &json!({ "request_id": request_id, "description": "Replace valve seat" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, analyses) = send_json(&app, get_request(&format!("/api/v1/sensors/{sensor_id}/analyses"))).await;
    assert_eq!(analyses["total"], 1);
    let (_, requests) = send_json(&app, get_request(&format!("/api/v1/analyses/{analysis_id}/requests"))).await;
    assert_eq!(requests["items"][0]["priority"], "CRITICAL");
    let (_, responses) = send_json(&app, get_request(&format!("/api/v1/requests/{request_id}/responses"))).await;
    assert_eq!(responses["items"][0]["responder"], "field-team");
    let (_, solutions) = send_json(&app, get_request(&format!("/api/v1/requests/{request_id}/solutions"))).await;
    assert_eq!(solutions["items"][0]["status"], "PROPOSED");
}

#[tokio::test]
async fn enum_lookup() {
    let app = app();

    let (status, json) = send_json(&app, get_request("/api/v1/enums/request_priority")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["values"], json!(["LOW", "NORMAL", "HIGH", "CRITICAL"]));

    let (status, json) = send_json(&app, get_request("/api/v1/enums/unknown")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_envelope(&json, "Not Found");
}

#[tokio::test]
async fn health_and_metrics_are_served() {
    let unit = fixtures::open_unit();
    let app = create_test_router(AppState::new(unit.clone()));

    let (status, body) = send(&app, get_request("/health/ping")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"pong");

    let (status, json) = send_json(&app, get_request("/health/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");

    let (status, body) = send(&app, get_request("/metrics")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8_lossy(&body).contains("sensorium_http_requests_total"));

    unit.close();
    let (status, json) = send_json(&app, get_request("/health/ready")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["status"], "unhealthy");
}
