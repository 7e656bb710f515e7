// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map collaborator contract.

use serde::Serialize;

use crate::models::{Coordinates, MarkerPopup, Recenter};

/// The interactive map widget.
///
/// Click events flow the other way: the host forwards them to
/// [`crate::services::WorkoutTracker::handle_map_click`].
pub trait MapView: Send {
    /// Create the map centered on `center` and attach the tile layer.
    fn initialize(&mut self, center: Coordinates, zoom: u8);

    /// Add a marker with an open popup.
    fn place_marker(&mut self, marker: &MarkerPopup);

    /// Move the view.
    fn recenter(&mut self, request: &Recenter);
}

/// Lifecycle of the map, driven by the one-shot geolocation result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MapState {
    /// Waiting for the geolocation result.
    AwaitingLocation,
    /// Map initialized at the user's position.
    Ready { center: Coordinates },
    /// Geolocation failed. Final for the process lifetime.
    Unavailable,
}

impl MapState {
    pub fn is_ready(&self) -> bool {
        matches!(self, MapState::Ready { .. })
    }
}
