// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Presentation payloads handed to the map and list collaborators.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::workout::{Coordinates, Workout, WorkoutDetails, WorkoutKind};

/// Leaflet popup options for workout markers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PopupOptions {
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
}

impl Default for PopupOptions {
    fn default() -> Self {
        Self {
            max_width: 250,
            min_width: 100,
            auto_close: false,
            close_on_click: false,
        }
    }
}

/// Marker with an open popup for one workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MarkerPopup {
    pub workout_id: String,
    /// `[lat, lng]`
    pub coordinates: [f64; 2],
    /// e.g. "🏃‍♂️ Running on April 14"
    pub content: String,
    /// e.g. "running-popup"
    pub style_class: String,
    pub options: PopupOptions,
}

impl MarkerPopup {
    pub fn for_workout(workout: &Workout) -> Self {
        let kind = workout.kind();
        Self {
            workout_id: workout.id().to_string(),
            coordinates: workout.coordinates().as_array(),
            content: format!("{} {}", kind.icon(), workout.description()),
            style_class: format!("{}-popup", kind),
            options: PopupOptions::default(),
        }
    }
}

/// One icon/value/unit row of a list entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EntryDetail {
    pub icon: String,
    pub value: String,
    pub unit: String,
}

impl EntryDetail {
    fn new(icon: &str, value: String, unit: &str) -> Self {
        Self {
            icon: icon.to_string(),
            value,
            unit: unit.to_string(),
        }
    }
}

/// Summary entry in the workout list, keyed by workout id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutEntry {
    pub id: String,
    /// "running" or "cycling"
    pub kind: String,
    pub title: String,
    pub details: Vec<EntryDetail>,
}

impl WorkoutEntry {
    pub fn for_workout(workout: &Workout) -> Self {
        let kind = workout.kind();
        let mut details = vec![
            EntryDetail::new(kind.icon(), workout.distance_km().to_string(), "km"),
            EntryDetail::new("⏱", workout.duration_min().to_string(), "min"),
        ];

        let metric = workout.derived_metric();
        details.push(EntryDetail::new(
            "⚡️",
            format!("{:.1}", metric.value()),
            metric.unit(),
        ));
        details.push(match *workout.details() {
            WorkoutDetails::Running { cadence_spm, .. } => {
                EntryDetail::new("🦶🏼", cadence_spm.to_string(), "spm")
            }
            WorkoutDetails::Cycling {
                elevation_gain_m, ..
            } => EntryDetail::new("⛰", elevation_gain_m.to_string(), "m"),
        });

        Self {
            id: workout.id().to_string(),
            kind: kind.to_string(),
            title: workout.description().to_string(),
            details,
        }
    }
}

/// Request to move the map view onto a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Recenter {
    /// `[lat, lng]`
    pub coordinates: [f64; 2],
    pub zoom: u8,
    pub animate: bool,
    pub pan_duration_secs: f64,
}

impl Recenter {
    pub fn new(coordinates: Coordinates, zoom: u8, pan_duration_secs: f64) -> Self {
        Self {
            coordinates: coordinates.as_array(),
            zoom,
            animate: true,
            pan_duration_secs,
        }
    }
}

/// Which variant-specific field the entry form shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FormLayout {
    pub show_cadence: bool,
    pub show_elevation: bool,
}

impl FormLayout {
    pub fn for_kind(kind: WorkoutKind) -> Self {
        Self {
            show_cadence: kind == WorkoutKind::Running,
            show_elevation: kind == WorkoutKind::Cycling,
        }
    }
}
