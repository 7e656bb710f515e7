// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout record model: one logged run or ride and its derived metric.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::time_utils::format_month_day;

/// Unique workout identifier (UUID v4 text).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for WorkoutId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for WorkoutId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A map location. Serialized as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check that both components are finite and within WGS84 bounds.
    pub fn validate(&self) -> Result<(), WorkoutError> {
        let valid = self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng);
        if valid {
            Ok(())
        } else {
            Err(WorkoutError::InvalidCoordinates {
                lat: self.lat,
                lng: self.lng,
            })
        }
    }

    pub fn as_array(&self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lat, c.lng]
    }
}

/// Workout variant discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Lowercase wire name ("running").
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Capitalized name used in descriptions ("Running").
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutKind {
    type Err = WorkoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(WorkoutError::UnknownKind(other.to_string())),
        }
    }
}

/// Whether a cycling elevation gain may be negative.
///
/// Cadence must always be positive, but elevation has historically only been
/// checked for finiteness, so downhill rides with negative gain are accepted
/// unless the stricter policy is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElevationPolicy {
    #[default]
    AnyFinite,
    NonNegative,
}

impl FromStr for ElevationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "any_finite" => Ok(ElevationPolicy::AnyFinite),
            "non_negative" => Ok(ElevationPolicy::NonNegative),
            other => Err(format!(
                "unknown elevation policy '{}' (expected any_finite or non_negative)",
                other
            )),
        }
    }
}

/// The variant-specific input attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VariantExtra {
    /// Running cadence, steps per minute.
    Cadence(f64),
    /// Cycling elevation gain, meters.
    ElevationGain(f64),
}

impl VariantExtra {
    pub fn value(&self) -> f64 {
        match self {
            VariantExtra::Cadence(v) | VariantExtra::ElevationGain(v) => *v,
        }
    }
}

/// Variant attributes with the derived metric cached at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutDetails {
    Running {
        cadence_spm: f64,
        pace_min_per_km: f64,
    },
    Cycling {
        elevation_gain_m: f64,
        speed_km_per_h: f64,
    },
}

impl WorkoutDetails {
    fn compute(
        distance_km: f64,
        duration_min: f64,
        extra: VariantExtra,
        policy: ElevationPolicy,
    ) -> Result<Self, WorkoutError> {
        match extra {
            VariantExtra::Cadence(cadence_spm) => {
                require_positive("cadence", cadence_spm)?;
                Ok(WorkoutDetails::Running {
                    cadence_spm,
                    pace_min_per_km: duration_min / distance_km,
                })
            }
            VariantExtra::ElevationGain(elevation_gain_m) => {
                require_finite("elevation", elevation_gain_m)?;
                if policy == ElevationPolicy::NonNegative && elevation_gain_m < 0.0 {
                    return Err(WorkoutError::Negative {
                        field: "elevation",
                        value: elevation_gain_m,
                    });
                }
                Ok(WorkoutDetails::Cycling {
                    elevation_gain_m,
                    speed_km_per_h: distance_km / (duration_min / 60.0),
                })
            }
        }
    }

    pub fn kind(&self) -> WorkoutKind {
        match self {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    pub fn extra(&self) -> VariantExtra {
        match *self {
            WorkoutDetails::Running { cadence_spm, .. } => VariantExtra::Cadence(cadence_spm),
            WorkoutDetails::Cycling {
                elevation_gain_m, ..
            } => VariantExtra::ElevationGain(elevation_gain_m),
        }
    }

    pub fn derived_metric(&self) -> DerivedMetric {
        match *self {
            WorkoutDetails::Running {
                pace_min_per_km, ..
            } => DerivedMetric::Pace(pace_min_per_km),
            WorkoutDetails::Cycling { speed_km_per_h, .. } => DerivedMetric::Speed(speed_km_per_h),
        }
    }
}

/// Pace (running) or speed (cycling).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DerivedMetric {
    /// Minutes per kilometer.
    Pace(f64),
    /// Kilometers per hour.
    Speed(f64),
}

impl DerivedMetric {
    pub fn value(&self) -> f64 {
        match self {
            DerivedMetric::Pace(v) | DerivedMetric::Speed(v) => *v,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            DerivedMetric::Pace(_) => "min/km",
            DerivedMetric::Speed(_) => "km/h",
        }
    }
}

/// One logged activity.
///
/// Created fully formed; only `interaction_count` changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: WorkoutId,
    created_at: DateTime<Utc>,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    details: WorkoutDetails,
    description: String,
    interaction_count: u32,
}

impl Workout {
    /// Create a workout stamped with the current time.
    pub fn new(
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        extra: VariantExtra,
        policy: ElevationPolicy,
    ) -> Result<Self, WorkoutError> {
        Self::new_at(
            coordinates,
            distance_km,
            duration_min,
            extra,
            policy,
            Utc::now(),
        )
    }

    /// Create a workout with an explicit creation time.
    pub fn new_at(
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        extra: VariantExtra,
        policy: ElevationPolicy,
        created_at: DateTime<Utc>,
    ) -> Result<Self, WorkoutError> {
        coordinates.validate()?;
        require_positive("distance", distance_km)?;
        require_positive("duration", duration_min)?;
        let details = WorkoutDetails::compute(distance_km, duration_min, extra, policy)?;

        // Stored timestamps carry millisecond precision.
        let created_at = created_at.trunc_subsecs(3);
        let description = describe(details.kind(), created_at);

        Ok(Self {
            id: WorkoutId::generate(),
            created_at,
            coordinates,
            distance_km,
            duration_min,
            details,
            description,
            interaction_count: 0,
        })
    }

    /// Rebuild a workout from persisted parts, re-checking every invariant.
    ///
    /// The derived metric is recomputed from distance and duration; identity,
    /// timestamp, description and interaction count are kept as stored.
    /// Elevation is only required to be finite: the sign policy applies to
    /// new input, not to workouts already accepted.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn restore(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        extra: VariantExtra,
        description: String,
        interaction_count: u32,
    ) -> Result<Self, WorkoutError> {
        coordinates.validate()?;
        require_positive("distance", distance_km)?;
        require_positive("duration", duration_min)?;
        let details = WorkoutDetails::compute(
            distance_km,
            duration_min,
            extra,
            ElevationPolicy::AnyFinite,
        )?;

        Ok(Self {
            id,
            created_at,
            coordinates,
            distance_km,
            duration_min,
            details,
            description,
            interaction_count,
        })
    }

    /// Count one user selection of this workout.
    pub fn record_interaction(&mut self) {
        self.interaction_count = self.interaction_count.saturating_add(1);
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn kind(&self) -> WorkoutKind {
        self.details.kind()
    }

    pub fn details(&self) -> &WorkoutDetails {
        &self.details
    }

    pub fn derived_metric(&self) -> DerivedMetric {
        self.details.derived_metric()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn interaction_count(&self) -> u32 {
        self.interaction_count
    }
}

/// "Running on April 14"
fn describe(kind: WorkoutKind, created_at: DateTime<Utc>) -> String {
    format!("{} on {}", kind.label(), format_month_day(created_at))
}

fn require_finite(field: &'static str, value: f64) -> Result<(), WorkoutError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(WorkoutError::NotFinite { field })
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), WorkoutError> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(WorkoutError::NotPositive { field, value })
    }
}

/// Errors from constructing a workout.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorkoutError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("Coordinates out of range: ({lat}, {lng})")]
    InvalidCoordinates { lat: f64, lng: f64 },

    #[error("Unknown workout type: {0}")]
    UnknownKind(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn philly() -> Coordinates {
        Coordinates::new(40.0, -75.0)
    }

    fn local_noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_running_pace() {
        let w = Workout::new(
            philly(),
            5.0,
            25.0,
            VariantExtra::Cadence(180.0),
            ElevationPolicy::default(),
        )
        .unwrap();

        assert_eq!(w.kind(), WorkoutKind::Running);
        assert_eq!(w.derived_metric(), DerivedMetric::Pace(5.0));
        assert_eq!(w.derived_metric().unit(), "min/km");
        assert_eq!(w.interaction_count(), 0);
    }

    #[test]
    fn test_cycling_speed() {
        let w = Workout::new(
            philly(),
            20.0,
            60.0,
            VariantExtra::ElevationGain(150.0),
            ElevationPolicy::default(),
        )
        .unwrap();

        assert_eq!(w.kind(), WorkoutKind::Cycling);
        assert_eq!(w.derived_metric(), DerivedMetric::Speed(20.0));
        assert_eq!(w.details().extra(), VariantExtra::ElevationGain(150.0));
    }

    #[test]
    fn test_description_format() {
        let run = Workout::new_at(
            philly(),
            5.0,
            25.0,
            VariantExtra::Cadence(170.0),
            ElevationPolicy::default(),
            local_noon(2024, 4, 14),
        )
        .unwrap();
        assert_eq!(run.description(), "Running on April 14");

        let ride = Workout::new_at(
            philly(),
            30.0,
            90.0,
            VariantExtra::ElevationGain(0.0),
            ElevationPolicy::default(),
            local_noon(2024, 1, 2),
        )
        .unwrap();
        assert_eq!(ride.description(), "Cycling on January 2");
    }

    #[test]
    fn test_rejects_non_positive_distance_and_duration() {
        for (distance, duration) in [(0.0, 10.0), (-1.0, 10.0), (5.0, 0.0), (5.0, -3.0)] {
            let result = Workout::new(
                philly(),
                distance,
                duration,
                VariantExtra::Cadence(160.0),
                ElevationPolicy::default(),
            );
            assert!(
                matches!(result, Err(WorkoutError::NotPositive { .. })),
                "expected rejection for ({}, {})",
                distance,
                duration
            );
        }
    }

    #[test]
    fn test_rejects_non_finite_inputs() {
        let result = Workout::new(
            philly(),
            f64::NAN,
            10.0,
            VariantExtra::Cadence(160.0),
            ElevationPolicy::default(),
        );
        assert_eq!(
            result.unwrap_err(),
            WorkoutError::NotFinite { field: "distance" }
        );

        let result = Workout::new(
            philly(),
            10.0,
            30.0,
            VariantExtra::ElevationGain(f64::INFINITY),
            ElevationPolicy::default(),
        );
        assert_eq!(
            result.unwrap_err(),
            WorkoutError::NotFinite { field: "elevation" }
        );
    }

    #[test]
    fn test_cadence_must_be_positive() {
        let result = Workout::new(
            philly(),
            5.0,
            25.0,
            VariantExtra::Cadence(0.0),
            ElevationPolicy::default(),
        );
        assert!(matches!(
            result,
            Err(WorkoutError::NotPositive {
                field: "cadence",
                ..
            })
        ));
    }

    #[test]
    fn test_elevation_policy() {
        let downhill = VariantExtra::ElevationGain(-40.0);

        let lenient = Workout::new(philly(), 10.0, 30.0, downhill, ElevationPolicy::AnyFinite);
        assert!(lenient.is_ok());

        let strict = Workout::new(philly(), 10.0, 30.0, downhill, ElevationPolicy::NonNegative);
        assert!(matches!(strict, Err(WorkoutError::Negative { .. })));

        let flat = Workout::new(
            philly(),
            10.0,
            30.0,
            VariantExtra::ElevationGain(0.0),
            ElevationPolicy::NonNegative,
        );
        assert!(flat.is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_coordinates() {
        let result = Workout::new(
            Coordinates::new(91.0, 0.0),
            5.0,
            25.0,
            VariantExtra::Cadence(180.0),
            ElevationPolicy::default(),
        );
        assert!(matches!(
            result,
            Err(WorkoutError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn test_record_interaction_counts() {
        let mut w = Workout::new(
            philly(),
            5.0,
            25.0,
            VariantExtra::Cadence(180.0),
            ElevationPolicy::default(),
        )
        .unwrap();

        for _ in 0..7 {
            w.record_interaction();
        }
        assert_eq!(w.interaction_count(), 7);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Workout::new(
            philly(),
            5.0,
            25.0,
            VariantExtra::Cadence(180.0),
            ElevationPolicy::default(),
        )
        .unwrap();
        let b = Workout::new(
            philly(),
            5.0,
            25.0,
            VariantExtra::Cadence(180.0),
            ElevationPolicy::default(),
        )
        .unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("running".parse::<WorkoutKind>().unwrap(), WorkoutKind::Running);
        assert_eq!(" cycling ".parse::<WorkoutKind>().unwrap(), WorkoutKind::Cycling);
        assert!("swimming".parse::<WorkoutKind>().is_err());
    }

    #[test]
    fn test_coordinates_serialize_as_pair() {
        let json = serde_json::to_string(&Coordinates::new(40.5, -75.25)).unwrap();
        assert_eq!(json, "[40.5,-75.25]");

        let back: Coordinates = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Coordinates::new(40.5, -75.25));
    }
}
