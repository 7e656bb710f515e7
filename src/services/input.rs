// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Raw form input parsing and validation.
//!
//! Form values arrive as text (or occasionally JSON numbers). Anything that
//! is missing or does not parse is treated as a non-finite number.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{ElevationPolicy, VariantExtra, WorkoutKind};

/// A single form field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Number(f64),
    Text(String),
}

impl RawField {
    fn to_number(&self) -> f64 {
        match self {
            RawField::Number(n) => *n,
            RawField::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
        }
    }
}

impl From<&str> for RawField {
    fn from(s: &str) -> Self {
        RawField::Text(s.to_string())
    }
}

impl From<f64> for RawField {
    fn from(n: f64) -> Self {
        RawField::Number(n)
    }
}

/// Form values for a new workout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawWorkoutInput {
    pub distance: Option<RawField>,
    pub duration: Option<RawField>,
    #[serde(default)]
    pub cadence: Option<RawField>,
    #[serde(default)]
    pub elevation: Option<RawField>,
}

impl RawWorkoutInput {
    pub fn running(
        distance: impl Into<RawField>,
        duration: impl Into<RawField>,
        cadence: impl Into<RawField>,
    ) -> Self {
        Self {
            distance: Some(distance.into()),
            duration: Some(duration.into()),
            cadence: Some(cadence.into()),
            elevation: None,
        }
    }

    pub fn cycling(
        distance: impl Into<RawField>,
        duration: impl Into<RawField>,
        elevation: impl Into<RawField>,
    ) -> Self {
        Self {
            distance: Some(distance.into()),
            duration: Some(duration.into()),
            cadence: None,
            elevation: Some(elevation.into()),
        }
    }
}

/// Numbers that passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedInput {
    pub distance_km: f64,
    pub duration_min: f64,
    pub extra: VariantExtra,
}

fn number(field: &Option<RawField>) -> f64 {
    field.as_ref().map_or(f64::NAN, RawField::to_number)
}

fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

fn all_positive(values: &[f64]) -> bool {
    values.iter().all(|v| *v > 0.0)
}

/// Parse and validate form input for `kind`.
///
/// Distance and duration must be finite and positive. Running cadence must be
/// finite and positive. Cycling elevation must be finite; its sign is only
/// checked under [`ElevationPolicy::NonNegative`].
pub fn validate(
    kind: WorkoutKind,
    raw: &RawWorkoutInput,
    policy: ElevationPolicy,
) -> Result<ValidatedInput> {
    let distance_km = number(&raw.distance);
    let duration_min = number(&raw.duration);

    let extra = match kind {
        WorkoutKind::Running => {
            let cadence = number(&raw.cadence);
            let values = [distance_km, duration_min, cadence];
            if !all_finite(&values) || !all_positive(&values) {
                return Err(invalid(kind, &values));
            }
            VariantExtra::Cadence(cadence)
        }
        WorkoutKind::Cycling => {
            let elevation = number(&raw.elevation);
            let values = [distance_km, duration_min, elevation];
            let sign_ok = policy == ElevationPolicy::AnyFinite || elevation >= 0.0;
            if !all_finite(&values) || !all_positive(&values[..2]) || !sign_ok {
                return Err(invalid(kind, &values));
            }
            VariantExtra::ElevationGain(elevation)
        }
    };

    Ok(ValidatedInput {
        distance_km,
        duration_min,
        extra,
    })
}

fn invalid(kind: WorkoutKind, values: &[f64]) -> AppError {
    tracing::debug!(%kind, ?values, "Rejected workout input");
    AppError::Validation(AppError::INVALID_INPUT_MESSAGE.to_string())
}
