// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout routes.

use crate::error::{AppError, Result};
use crate::models::{Coordinates, StoredWorkout, WorkoutEntry, WorkoutKind, WorkoutStats};
use crate::routes::{with_tracker, ApiResponse};
use crate::services::{RawField, RawWorkoutInput};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Maximum accepted workout id length.
const MAX_ID_LEN: usize = 64;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/workouts",
            get(get_workouts).post(create_workout).delete(reset_workouts),
        )
        .route("/api/workouts/{id}/select", post(select_workout))
        .route("/api/stats", get(get_stats))
}

// ─── Listing ─────────────────────────────────────────────────

/// Stored records plus their list entries, in creation order.
#[derive(Serialize)]
pub struct WorkoutsResponse {
    pub workouts: Vec<StoredWorkout>,
    pub entries: Vec<WorkoutEntry>,
}

async fn get_workouts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<WorkoutsResponse>>> {
    with_tracker(&state, |tracker| {
        let workouts = tracker.workouts();
        Ok(WorkoutsResponse {
            workouts: workouts.to_stored(),
            entries: workouts.iter().map(WorkoutEntry::for_workout).collect(),
        })
    })
    .await
}

// ─── Creation ────────────────────────────────────────────────

/// Form submission. Without `coordinates` the last map click is used.
#[derive(Deserialize)]
struct NewWorkoutRequest {
    #[serde(rename = "type")]
    kind: String,
    distance: Option<RawField>,
    duration: Option<RawField>,
    cadence: Option<RawField>,
    elevation: Option<RawField>,
    coordinates: Option<Coordinates>,
}

/// The new record, and whether it reached storage.
#[derive(Serialize)]
pub struct CreatedWorkout {
    #[serde(flatten)]
    pub workout: StoredWorkout,
    pub persisted: bool,
}

async fn create_workout(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewWorkoutRequest>,
) -> Result<Json<ApiResponse<CreatedWorkout>>> {
    let kind: WorkoutKind = body.kind.parse().map_err(AppError::from)?;
    let raw = RawWorkoutInput {
        distance: body.distance,
        duration: body.duration,
        cadence: body.cadence,
        elevation: body.elevation,
    };

    with_tracker(&state, |tracker| {
        let workout = match body.coordinates {
            Some(coordinates) => tracker.request_new_workout(kind, coordinates, &raw)?,
            None => tracker.submit_form(kind, &raw)?,
        };
        let workout = StoredWorkout::from(workout);
        Ok(CreatedWorkout {
            workout,
            persisted: tracker.is_persisted(),
        })
    })
    .await
}

// ─── Selection ───────────────────────────────────────────────

/// List entry click. Unknown ids are ignored and yield `null`.
async fn select_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Option<StoredWorkout>>>> {
    if id.len() > MAX_ID_LEN {
        return Err(AppError::BadRequest("Workout id too long".to_string()));
    }

    with_tracker(&state, |tracker| {
        Ok(tracker.select_workout(&id).map(StoredWorkout::from))
    })
    .await
}

// ─── Reset ───────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ResetResponse {
    /// The front-end should reload to start over.
    pub reload: bool,
}

/// Remove all stored workouts and reinitialize.
async fn reset_workouts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<ResetResponse>>> {
    tracing::info!("User-initiated reset");
    with_tracker(&state, |tracker| {
        tracker.reset_all()?;
        Ok(ResetResponse { reload: true })
    })
    .await
}

// ─── Stats ───────────────────────────────────────────────────

async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<WorkoutStats>>> {
    with_tracker(&state, |tracker| Ok(tracker.stats())).await
}
