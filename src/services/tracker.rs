// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout tracker: the controller behind the map widget.
//!
//! Handles the core workflow:
//! 1. Initialize the map once the position is known
//! 2. Validate form input and build a typed workout
//! 3. Append it to the collection and render marker + list entry
//! 4. Persist the full collection

use serde::Serialize;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    Coordinates, ElevationPolicy, FormLayout, MarkerPopup, Recenter, Workout, WorkoutCollection,
    WorkoutEntry, WorkoutKind, WorkoutStats,
};
use crate::services::geolocation::PositionFix;
use crate::services::input::{self, RawWorkoutInput};
use crate::services::list::WorkoutList;
use crate::services::map::{MapState, MapView};
use crate::storage::WorkoutRepository;

/// Map and validation tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerSettings {
    /// Zoom used when the map is first shown
    pub initial_zoom: u8,
    /// Zoom used when focusing a selected workout
    pub focus_zoom: u8,
    /// Pan animation length when focusing a workout
    pub pan_duration_secs: f64,
    pub elevation_policy: ElevationPolicy,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            initial_zoom: 15,
            focus_zoom: 13,
            pan_duration_secs: 1.0,
            elevation_policy: ElevationPolicy::AnyFinite,
        }
    }
}

impl From<&Config> for TrackerSettings {
    fn from(config: &Config) -> Self {
        Self {
            initial_zoom: config.map_initial_zoom,
            focus_zoom: config.map_focus_zoom,
            pan_duration_secs: config.map_pan_duration_secs,
            elevation_policy: config.elevation_policy,
        }
    }
}

/// Entry form visibility and the field layout for the selected kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FormState {
    pub visible: bool,
    pub kind: WorkoutKind,
    pub layout: FormLayout,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            visible: false,
            kind: WorkoutKind::Running,
            layout: FormLayout::for_kind(WorkoutKind::Running),
        }
    }
}

/// Owns the workout collection and drives the map and list.
pub struct WorkoutTracker {
    settings: TrackerSettings,
    repository: WorkoutRepository,
    map: Box<dyn MapView>,
    list: Box<dyn WorkoutList>,
    workouts: WorkoutCollection,
    map_state: MapState,
    pending_click: Option<Coordinates>,
    form: FormState,
    /// False while the last write to storage failed
    persisted: bool,
}

impl WorkoutTracker {
    pub fn new(
        settings: TrackerSettings,
        repository: WorkoutRepository,
        map: Box<dyn MapView>,
        list: Box<dyn WorkoutList>,
    ) -> Self {
        Self {
            settings,
            repository,
            map,
            list,
            workouts: WorkoutCollection::new(),
            map_state: MapState::AwaitingLocation,
            pending_click: None,
            form: FormState::default(),
            persisted: true,
        }
    }

    // ─── Start-up ────────────────────────────────────────────────

    /// Load the stored collection and render a list entry for each workout.
    ///
    /// Missing or unreadable data leaves the collection empty. Returns the
    /// number of workouts loaded.
    pub fn load_persisted(&mut self) -> usize {
        let loaded = match self.repository.load() {
            Ok(Some(collection)) => collection,
            Ok(None) => {
                tracing::debug!(key = self.repository.key(), "No stored workouts");
                WorkoutCollection::new()
            }
            Err(e) => {
                tracing::warn!(
                    key = self.repository.key(),
                    error = %e,
                    "Ignoring stored workouts, starting empty"
                );
                WorkoutCollection::new()
            }
        };

        self.workouts = loaded;
        for workout in &self.workouts {
            self.list.render_entry(&WorkoutEntry::for_workout(workout));
            if self.map_state.is_ready() {
                self.map.place_marker(&MarkerPopup::for_workout(workout));
            }
        }

        tracing::info!(count = self.workouts.len(), "Workouts loaded");
        self.workouts.len()
    }

    /// Apply the one-shot geolocation result.
    ///
    /// The first result is final; anything after it is ignored. On success
    /// the map is initialized and every loaded workout gets its marker. On
    /// failure the map stays unavailable for good.
    pub fn on_position(&mut self, fix: PositionFix) -> Result<()> {
        if self.map_state != MapState::AwaitingLocation {
            tracing::warn!(state = ?self.map_state, "Position already resolved, ignoring");
            return Ok(());
        }

        match fix {
            Ok(center) => {
                center.validate()?;
                self.map.initialize(center, self.settings.initial_zoom);
                self.map_state = MapState::Ready { center };
                for workout in &self.workouts {
                    self.map.place_marker(&MarkerPopup::for_workout(workout));
                }
                tracing::info!(
                    lat = center.lat,
                    lng = center.lng,
                    markers = self.workouts.len(),
                    "Map initialized"
                );
                Ok(())
            }
            Err(reason) => {
                self.map_state = MapState::Unavailable;
                tracing::warn!(%reason, "Geolocation failed, map unavailable");
                Err(AppError::GeolocationUnavailable(reason))
            }
        }
    }

    // ─── Form ────────────────────────────────────────────────────

    /// Remember the clicked location and show the entry form.
    pub fn handle_map_click(&mut self, coordinates: Coordinates) -> Result<()> {
        self.require_map()?;
        coordinates.validate()?;
        self.pending_click = Some(coordinates);
        self.form.visible = true;
        Ok(())
    }

    /// Switch the form between the cadence and elevation fields.
    pub fn select_form_kind(&mut self, kind: WorkoutKind) -> FormState {
        self.form.kind = kind;
        self.form.layout = FormLayout::for_kind(kind);
        self.form
    }

    /// Create a workout at the last clicked location, then hide the form.
    pub fn submit_form(&mut self, kind: WorkoutKind, raw: &RawWorkoutInput) -> Result<&Workout> {
        let coordinates = self.pending_click.ok_or_else(|| {
            AppError::BadRequest("Click on the map to choose a location first".to_string())
        })?;

        let index = self.add_workout(kind, coordinates, raw)?;
        self.pending_click = None;
        self.form = FormState {
            visible: false,
            ..self.form
        };
        Ok(&self.workouts.as_slice()[index])
    }

    // ─── Workouts ────────────────────────────────────────────────

    /// Validate input and record a new workout.
    ///
    /// Nothing changes unless validation succeeds. On success the workout is
    /// appended, its marker and list entry are rendered, and the collection
    /// is persisted.
    pub fn request_new_workout(
        &mut self,
        kind: WorkoutKind,
        coordinates: Coordinates,
        raw: &RawWorkoutInput,
    ) -> Result<&Workout> {
        let index = self.add_workout(kind, coordinates, raw)?;
        Ok(&self.workouts.as_slice()[index])
    }

    fn add_workout(
        &mut self,
        kind: WorkoutKind,
        coordinates: Coordinates,
        raw: &RawWorkoutInput,
    ) -> Result<usize> {
        self.require_map()?;

        let policy = self.settings.elevation_policy;
        let input = input::validate(kind, raw, policy)?;
        let workout = Workout::new(
            coordinates,
            input.distance_km,
            input.duration_min,
            input.extra,
            policy,
        )?;

        let index = self.workouts.len();
        let workout = self.workouts.push(workout)?;
        self.map.place_marker(&MarkerPopup::for_workout(workout));
        self.list.render_entry(&WorkoutEntry::for_workout(workout));

        tracing::info!(
            id = %workout.id(),
            kind = %workout.kind(),
            distance_km = workout.distance_km(),
            duration_min = workout.duration_min(),
            metric = workout.derived_metric().value(),
            "Workout recorded"
        );

        // The in-memory collection stays authoritative; the next append
        // rewrites the whole collection.
        self.persisted = match self.repository.save(&self.workouts) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    count = self.workouts.len(),
                    "Failed to persist workouts"
                );
                false
            }
        };

        Ok(index)
    }

    /// Count a selection and focus the map on the workout.
    ///
    /// Unknown ids are ignored.
    pub fn select_workout(&mut self, id: &str) -> Option<&Workout> {
        let Some(workout) = self.workouts.get_mut(id) else {
            tracing::debug!(id, "Selected unknown workout, ignoring");
            return None;
        };

        if self.map_state.is_ready() {
            self.map.recenter(&Recenter::new(
                workout.coordinates(),
                self.settings.focus_zoom,
                self.settings.pan_duration_secs,
            ));
        }
        workout.record_interaction();

        Some(&*workout)
    }

    /// Drop all stored workouts and return to the start-up state.
    pub fn reset_all(&mut self) -> Result<()> {
        self.repository.clear()?;
        let dropped = self.workouts.len();

        self.workouts = WorkoutCollection::new();
        self.list.clear();
        self.map_state = MapState::AwaitingLocation;
        self.pending_click = None;
        self.form = FormState::default();
        self.persisted = true;

        tracing::info!(dropped, "Tracker reset, reload requested");
        Ok(())
    }

    // ─── Accessors ───────────────────────────────────────────────

    pub fn workouts(&self) -> &WorkoutCollection {
        &self.workouts
    }

    pub fn map_state(&self) -> MapState {
        self.map_state
    }

    pub fn form(&self) -> FormState {
        self.form
    }

    pub fn pending_click(&self) -> Option<Coordinates> {
        self.pending_click
    }

    /// Whether storage holds the current collection. False after a failed
    /// write until a later write succeeds.
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    pub fn stats(&self) -> WorkoutStats {
        WorkoutStats::from_workouts(&self.workouts)
    }

    fn require_map(&self) -> Result<()> {
        if self.map_state.is_ready() {
            Ok(())
        } else {
            Err(AppError::MapUnavailable)
        }
    }
}
