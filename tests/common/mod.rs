// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;
use workout_map::config::Config;
use workout_map::routes::create_router;
use workout_map::services::{RenderQueue, TrackerSettings, WorkoutTracker};
use workout_map::storage::{KeyValueStore, MemoryStore, WorkoutRepository};
use workout_map::AppState;

/// Create a test app backed by the given store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app_with_store<S>(store: S) -> (Router, Arc<AppState>)
where
    S: KeyValueStore + 'static,
{
    let config = Config::default();
    let repository = WorkoutRepository::new(
        Box::new(store) as Box<dyn KeyValueStore>,
        config.storage_key.clone(),
    );

    let render_queue = RenderQueue::new();
    let mut tracker = WorkoutTracker::new(
        TrackerSettings::from(&config),
        repository,
        Box::new(render_queue.clone()),
        Box::new(render_queue.clone()),
    );
    tracker.load_persisted();
    render_queue.drain();

    let state = Arc::new(AppState {
        config,
        tracker: Mutex::new(tracker),
        render_queue,
    });

    (create_router(state.clone()), state)
}

/// Create a test app with an empty in-memory store.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    create_test_app_with_store(MemoryStore::new())
}

/// Send a request and decode the JSON body.
#[allow(dead_code)]
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Resolve geolocation so that the map is ready.
#[allow(dead_code)]
pub async fn locate(app: &Router) {
    let (status, _) = send(
        app,
        "POST",
        "/api/position",
        Some(serde_json::json!({"latitude": 40.0, "longitude": -75.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
