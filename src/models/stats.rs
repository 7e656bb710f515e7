//! Workout totals for the summary panel.
//!
//! Computed on demand from the in-memory collection; nothing here is
//! persisted.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::workout::{Workout, WorkoutKind};

/// Count, distance and time for a group of workouts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub count: u32,
    pub distance_km: f64,
    pub duration_min: f64,
}

impl Totals {
    fn add(&mut self, workout: &Workout) {
        self.count += 1;
        self.distance_km += workout.distance_km();
        self.duration_min += workout.duration_min();
    }
}

/// Aggregates over the whole collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutStats {
    // ─── Overall ─────────────────────────────────────────────────
    pub overall: Totals,

    // ─── By Kind ─────────────────────────────────────────────────
    /// Keyed by "running" / "cycling"
    #[serde(default)]
    pub by_kind: HashMap<WorkoutKind, Totals>,

    // ─── Engagement ──────────────────────────────────────────────
    /// Sum of interaction counts
    #[serde(default)]
    pub total_interactions: u64,
}

impl WorkoutStats {
    pub fn from_workouts<'a, I>(workouts: I) -> Self
    where
        I: IntoIterator<Item = &'a Workout>,
    {
        let mut stats = Self::default();
        for workout in workouts {
            stats.overall.add(workout);
            stats.by_kind.entry(workout.kind()).or_default().add(workout);
            stats.total_interactions += u64::from(workout.interaction_count());
        }
        stats
    }
}
