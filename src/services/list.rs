//! Workout list collaborator contract.

use crate::models::WorkoutEntry;

/// The sidebar list of workouts.
///
/// Entry clicks are forwarded by the host to
/// [`crate::services::WorkoutTracker::select_workout`] with the entry id.
pub trait WorkoutList: Send {
    /// Append an entry keyed by `entry.id`.
    fn render_entry(&mut self, entry: &WorkoutEntry);

    /// Remove all entries.
    fn clear(&mut self);
}
