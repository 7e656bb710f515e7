// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ordered, append-only workout collection.

use std::collections::HashSet;

use crate::models::record::{RecordError, StoredWorkout};
use crate::models::workout::{Workout, WorkoutId};

/// Workouts in creation order. Ids are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutCollection {
    workouts: Vec<Workout>,
}

impl WorkoutCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a workout, rejecting a duplicate id.
    pub fn push(&mut self, workout: Workout) -> Result<&Workout, CollectionError> {
        if self.get(workout.id().as_str()).is_some() {
            return Err(CollectionError::DuplicateId(workout.id().clone()));
        }
        let index = self.workouts.len();
        self.workouts.push(workout);
        Ok(&self.workouts[index])
    }

    /// Find a workout by id (linear scan).
    pub fn get(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id().as_str() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Workout> {
        self.workouts.iter_mut().find(|w| w.id().as_str() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Workout> {
        self.workouts.iter()
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub fn as_slice(&self) -> &[Workout] {
        &self.workouts
    }

    /// Plain records in collection order.
    pub fn to_stored(&self) -> Vec<StoredWorkout> {
        self.workouts.iter().map(StoredWorkout::from).collect()
    }

    /// Re-hydrate a collection from plain records.
    ///
    /// Fails as a whole if any record is invalid or ids repeat.
    pub fn from_stored(records: Vec<StoredWorkout>) -> Result<Self, CollectionError> {
        let mut seen = HashSet::with_capacity(records.len());
        let mut workouts = Vec::with_capacity(records.len());

        for (index, record) in records.into_iter().enumerate() {
            let workout = record
                .into_workout()
                .map_err(|source| CollectionError::InvalidRecord { index, source })?;
            if !seen.insert(workout.id().clone()) {
                return Err(CollectionError::DuplicateId(workout.id().clone()));
            }
            workouts.push(workout);
        }

        Ok(Self { workouts })
    }
}

impl<'a> IntoIterator for &'a WorkoutCollection {
    type Item = &'a Workout;
    type IntoIter = std::slice::Iter<'a, Workout>;

    fn into_iter(self) -> Self::IntoIter {
        self.workouts.iter()
    }
}

/// Errors from collection operations.
#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error("Duplicate workout id: {0}")]
    DuplicateId(WorkoutId),

    #[error("Invalid record at index {index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: RecordError,
    },
}
