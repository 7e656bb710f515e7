// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod geolocation;
pub mod input;
pub mod list;
pub mod map;
pub mod render_queue;
pub mod tracker;

pub use geolocation::{GeolocationError, PositionFix};
pub use input::{RawField, RawWorkoutInput};
pub use list::WorkoutList;
pub use map::{MapState, MapView};
pub use render_queue::{RenderCommand, RenderQueue};
pub use tracker::{FormState, TrackerSettings, WorkoutTracker};
