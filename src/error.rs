// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::models::{CollectionError, WorkoutError};
use crate::services::geolocation::GeolocationError;
use crate::storage::StorageError;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Could not find your location: {0}")]
    GeolocationUnavailable(GeolocationError),

    #[error("Map is not available")]
    MapUnavailable,

    #[error("Stored workouts are corrupt: {0}")]
    PersistedDataCorrupt(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Message shown to the user for input validation failures.
    pub const INVALID_INPUT_MESSAGE: &'static str = "Inputs have to be positive numbers!";

    /// Text for the blocking notification shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(_) => Self::INVALID_INPUT_MESSAGE.to_string(),
            AppError::GeolocationUnavailable(_) => "Could not find your location".to_string(),
            AppError::MapUnavailable => {
                "The map is unavailable until your location is known".to_string()
            }
            AppError::NotFound(_) => "Workout not found".to_string(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::PersistedDataCorrupt(_) | AppError::Storage(_) | AppError::Internal(_) => {
                "Something went wrong, please try again".to_string()
            }
        }
    }
}

impl From<WorkoutError> for AppError {
    fn from(err: WorkoutError) -> Self {
        match err {
            WorkoutError::UnknownKind(kind) => {
                AppError::BadRequest(format!("Unknown workout type: {}", kind))
            }
            // Not a form input problem, so the positive-numbers message
            // would be wrong here.
            err @ WorkoutError::InvalidCoordinates { .. } => AppError::BadRequest(err.to_string()),
            other => AppError::Validation(other.to_string()),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<CollectionError> for AppError {
    fn from(err: CollectionError) -> Self {
        AppError::Internal(anyhow::Error::new(err))
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                Some(msg.clone()),
            ),
            AppError::GeolocationUnavailable(reason) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "geolocation_unavailable",
                Some(reason.to_string()),
            ),
            AppError::MapUnavailable => (StatusCode::CONFLICT, "map_unavailable", None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::PersistedDataCorrupt(msg) => {
                tracing::error!(error = %msg, "Persisted data corrupt");
                (StatusCode::INTERNAL_SERVER_ERROR, "corrupt_data", None)
            }
            AppError::Storage(msg) => {
                tracing::error!(error = %msg, "Storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            message: self.user_message(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
