// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod collection;
pub mod record;
pub mod stats;
pub mod view;
pub mod workout;

pub use collection::{CollectionError, WorkoutCollection};
pub use record::{RecordError, StoredWorkout};
pub use stats::WorkoutStats;
pub use view::{FormLayout, MarkerPopup, Recenter, WorkoutEntry};
pub use workout::{
    Coordinates, DerivedMetric, ElevationPolicy, VariantExtra, Workout, WorkoutDetails,
    WorkoutError, WorkoutId, WorkoutKind,
};
