// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map lifecycle and form integration tests.

use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{create_test_app, locate, send};

#[tokio::test]
async fn test_map_settings_before_location() {
    let (app, _) = create_test_app();

    let (status, body) = send(&app, "GET", "/api/map", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["state"]["status"], "awaiting_location");
    assert_eq!(body["data"]["initial_zoom"], 15);
    assert_eq!(body["data"]["focus_zoom"], 13);
    assert_eq!(body["data"]["form"]["visible"], false);
    assert!(body["commands"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_position_initializes_map() {
    let (app, _) = create_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/position",
        Some(json!({"latitude": 48.85, "longitude": 2.35})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ready");
    let commands = body["commands"].as_array().unwrap();
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0]["type"], "initialize_map");
    assert_eq!(commands[0]["center"], json!([48.85, 2.35]));
    assert_eq!(commands[0]["zoom"], 15);
}

#[tokio::test]
async fn test_second_position_is_ignored() {
    let (app, _) = create_test_app();
    locate(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/position",
        Some(json!({"latitude": 10.0, "longitude": 10.0})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["commands"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_out_of_range_position_rejected() {
    let (app, _) = create_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/position",
        Some(json!({"latitude": 91.0, "longitude": 0.0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
    assert_eq!(body["message"], "Coordinates out of range: (91, 0)");

    let (_, body) = send(&app, "GET", "/api/map", None).await;
    assert_eq!(body["data"]["state"]["status"], "awaiting_location");
}

#[tokio::test]
async fn test_out_of_range_click_rejected() {
    let (app, state) = create_test_app();
    locate(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/map/click",
        Some(json!({"lat": 10.0, "lng": 181.0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_ne!(body["message"], "Inputs have to be positive numbers!");

    let tracker = state.tracker.lock().await;
    assert!(tracker.pending_click().is_none());
    assert!(!tracker.form().visible);
}

#[tokio::test]
async fn test_position_error_makes_map_unavailable() {
    let (app, _) = create_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/position/error",
        Some(json!({"reason": "permission_denied"})),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "geolocation_unavailable");
    assert_eq!(body["message"], "Could not find your location");

    let (_, body) = send(&app, "GET", "/api/map", None).await;
    assert_eq!(body["data"]["state"]["status"], "unavailable");

    // A late fix does not revive the map.
    let (status, body) = send(
        &app,
        "POST",
        "/api/position",
        Some(json!({"latitude": 40.0, "longitude": -75.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "unavailable");

    let (status, _) = send(
        &app,
        "POST",
        "/api/map/click",
        Some(json!({"lat": 40.0, "lng": -75.0})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_click_then_submit_form() {
    let (app, state) = create_test_app();
    locate(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/map/click",
        Some(json!({"lat": 40.5, "lng": -74.5})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["visible"], true);

    let (status, body) = send(
        &app,
        "PUT",
        "/api/form/kind",
        Some(json!({"type": "cycling"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["layout"]["show_elevation"], true);
    assert_eq!(body["data"]["layout"]["show_cadence"], false);

    let (status, body) = send(
        &app,
        "POST",
        "/api/workouts",
        Some(json!({
            "type": "cycling",
            "distance": "30",
            "duration": "90",
            "elevation": "-20"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["coordinates"], json!([40.5, -74.5]));
    assert_eq!(body["data"]["derivedMetric"], 20.0);
    assert_eq!(body["data"]["variantExtra"], -20.0);

    let tracker = state.tracker.lock().await;
    assert!(tracker.pending_click().is_none());
    assert!(!tracker.form().visible);
}

#[tokio::test]
async fn test_submit_without_click_is_bad_request() {
    let (app, _) = create_test_app();
    locate(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/workouts",
        Some(json!({
            "type": "running",
            "distance": "5",
            "duration": "25",
            "cadence": "180"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_unknown_form_kind() {
    let (app, _) = create_test_app();

    let (status, _) = send(
        &app,
        "PUT",
        "/api/form/kind",
        Some(json!({"type": "rowing"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
