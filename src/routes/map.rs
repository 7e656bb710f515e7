// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map lifecycle and entry form routes.

use crate::error::{AppError, Result};
use crate::models::{Coordinates, WorkoutKind};
use crate::routes::{with_tracker, ApiResponse};
use crate::services::{FormState, GeolocationError, MapState};
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/map", get(get_map))
        .route("/api/position", post(post_position))
        .route("/api/position/error", post(post_position_error))
        .route("/api/map/click", post(post_map_click))
        .route("/api/form/kind", put(put_form_kind))
}

// ─── Map Settings ────────────────────────────────────────────

/// Everything the front-end needs to build the map widget.
#[derive(Serialize)]
pub struct MapResponse {
    pub tile_url: String,
    pub tile_attribution: String,
    pub initial_zoom: u8,
    pub focus_zoom: u8,
    pub state: MapState,
    pub form: FormState,
}

async fn get_map(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse<MapResponse>>> {
    let config = &state.config;
    with_tracker(&state, |tracker| {
        Ok(MapResponse {
            tile_url: config.map_tile_url.clone(),
            tile_attribution: config.map_tile_attribution.clone(),
            initial_zoom: tracker.settings().initial_zoom,
            focus_zoom: tracker.settings().focus_zoom,
            state: tracker.map_state(),
            form: tracker.form(),
        })
    })
    .await
}

// ─── Geolocation ─────────────────────────────────────────────

#[derive(Deserialize)]
struct PositionRequest {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct PositionErrorRequest {
    reason: GeolocationError,
}

/// Browser geolocation succeeded.
async fn post_position(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PositionRequest>,
) -> Result<Json<ApiResponse<MapState>>> {
    let center = Coordinates::new(body.latitude, body.longitude);
    with_tracker(&state, |tracker| {
        tracker.on_position(Ok(center))?;
        Ok(tracker.map_state())
    })
    .await
}

/// Browser geolocation failed; the map stays unavailable.
async fn post_position_error(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PositionErrorRequest>,
) -> Result<Json<ApiResponse<MapState>>> {
    with_tracker(&state, |tracker| {
        tracker.on_position(Err(body.reason))?;
        Ok(tracker.map_state())
    })
    .await
}

// ─── Form ────────────────────────────────────────────────────

#[derive(Deserialize)]
struct MapClickRequest {
    lat: f64,
    lng: f64,
}

/// Map click: remember the location and open the form.
async fn post_map_click(
    State(state): State<Arc<AppState>>,
    Json(body): Json<MapClickRequest>,
) -> Result<Json<ApiResponse<FormState>>> {
    let coordinates = Coordinates::new(body.lat, body.lng);
    with_tracker(&state, |tracker| {
        tracker.handle_map_click(coordinates)?;
        Ok(tracker.form())
    })
    .await
}

#[derive(Deserialize)]
struct FormKindRequest {
    #[serde(rename = "type")]
    kind: String,
}

/// Workout type select changed.
async fn put_form_kind(
    State(state): State<Arc<AppState>>,
    Json(body): Json<FormKindRequest>,
) -> Result<Json<ApiResponse<FormState>>> {
    let kind: WorkoutKind = body.kind.parse().map_err(AppError::from)?;
    with_tracker(&state, |tracker| Ok(tracker.select_form_kind(kind))).await
}
