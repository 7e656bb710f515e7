// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persisted workout shape and re-hydration into typed variants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::workout::{Coordinates, VariantExtra, Workout, WorkoutError, WorkoutId, WorkoutKind};
use crate::time_utils::format_utc_rfc3339;

/// Plain workout record as written to storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredWorkout {
    pub id: String,
    /// Creation time (RFC 3339, UTC)
    pub created_at: String,
    /// `[lat, lng]`
    pub coordinates: Coordinates,
    pub distance_km: f64,
    pub duration_min: f64,
    pub variant_kind: WorkoutKind,
    /// Cadence (running) or elevation gain (cycling)
    pub variant_extra: f64,
    /// Pace (running) or speed (cycling)
    pub derived_metric: f64,
    pub description: String,
    #[serde(default)]
    pub interaction_count: u32,
}

impl From<&Workout> for StoredWorkout {
    fn from(workout: &Workout) -> Self {
        Self {
            id: workout.id().to_string(),
            created_at: format_utc_rfc3339(workout.created_at()),
            coordinates: workout.coordinates(),
            distance_km: workout.distance_km(),
            duration_min: workout.duration_min(),
            variant_kind: workout.kind(),
            variant_extra: workout.details().extra().value(),
            derived_metric: workout.derived_metric().value(),
            description: workout.description().to_string(),
            interaction_count: workout.interaction_count(),
        }
    }
}

impl StoredWorkout {
    /// Rebuild the typed workout, switching on `variant_kind`.
    pub fn into_workout(self) -> Result<Workout, RecordError> {
        if self.id.trim().is_empty() {
            return Err(RecordError::MissingId);
        }

        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| RecordError::InvalidTimestamp(format!("{}: {}", self.created_at, e)))?
            .with_timezone(&Utc);

        let extra = match self.variant_kind {
            WorkoutKind::Running => VariantExtra::Cadence(self.variant_extra),
            WorkoutKind::Cycling => VariantExtra::ElevationGain(self.variant_extra),
        };

        let workout = Workout::restore(
            WorkoutId::from(self.id),
            created_at,
            self.coordinates,
            self.distance_km,
            self.duration_min,
            extra,
            self.description,
            self.interaction_count,
        )?;

        if workout.derived_metric().value() != self.derived_metric {
            tracing::debug!(
                id = %workout.id(),
                stored = self.derived_metric,
                computed = workout.derived_metric().value(),
                "Stored derived metric differs from recomputed value"
            );
        }

        Ok(workout)
    }
}

/// Errors from re-hydrating a stored record.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Record has no id")]
    MissingId,

    #[error("Invalid createdAt timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid workout fields: {0}")]
    Invalid(#[from] WorkoutError),
}
