// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed persistence for the workout collection.
//!
//! The whole collection is stored as one JSON array under a single key.

use crate::error::{AppError, Result};
use crate::models::{StoredWorkout, WorkoutCollection};
use crate::storage::KeyValueStore;

/// Reads and writes the workout collection through a key-value store.
pub struct WorkoutRepository {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl WorkoutRepository {
    pub fn new(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Serialize and write the full collection.
    pub fn save(&self, collection: &WorkoutCollection) -> Result<()> {
        let json = serde_json::to_string(&collection.to_stored()).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Failed to serialize workouts: {}", e))
        })?;
        self.store.save(&self.key, &json)?;
        tracing::debug!(key = %self.key, count = collection.len(), "Workouts persisted");
        Ok(())
    }

    /// Read the collection.
    ///
    /// Returns `Ok(None)` when nothing is stored and `PersistedDataCorrupt`
    /// when the stored value cannot be turned back into typed workouts.
    pub fn load(&self) -> Result<Option<WorkoutCollection>> {
        let Some(json) = self.store.load(&self.key)? else {
            return Ok(None);
        };

        let records: Vec<StoredWorkout> = serde_json::from_str(&json)
            .map_err(|e| AppError::PersistedDataCorrupt(format!("Invalid JSON: {}", e)))?;

        let collection = WorkoutCollection::from_stored(records)
            .map_err(|e| AppError::PersistedDataCorrupt(e.to_string()))?;

        Ok(Some(collection))
    }

    /// Remove the stored collection.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(&self.key)?;
        tracing::info!(key = %self.key, "Stored workouts cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, ElevationPolicy, VariantExtra, Workout};
    use crate::storage::{keys, MemoryStore};

    fn repo(store: &MemoryStore) -> WorkoutRepository {
        WorkoutRepository::new(Box::new(store.clone()), keys::WORKOUTS)
    }

    #[test]
    fn test_load_empty_store() {
        let store = MemoryStore::new();
        assert!(repo(&store).load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let repository = repo(&store);

        let mut collection = WorkoutCollection::new();
        collection
            .push(
                Workout::new(
                    Coordinates::new(40.0, -75.0),
                    5.0,
                    25.0,
                    VariantExtra::Cadence(180.0),
                    ElevationPolicy::default(),
                )
                .unwrap(),
            )
            .unwrap();

        repository.save(&collection).unwrap();
        let loaded = repository.load().unwrap().unwrap();
        assert_eq!(loaded, collection);
    }

    #[test]
    fn test_corrupt_json() {
        let store = MemoryStore::new();
        store.save(keys::WORKOUTS, "{not json").unwrap();

        assert!(matches!(
            repo(&store).load(),
            Err(AppError::PersistedDataCorrupt(_))
        ));
    }

    #[test]
    fn test_wrong_shape() {
        let store = MemoryStore::new();
        store
            .save(keys::WORKOUTS, r#"[{"id": "1", "type": "running"}]"#)
            .unwrap();

        assert!(matches!(
            repo(&store).load(),
            Err(AppError::PersistedDataCorrupt(_))
        ));
    }

    #[test]
    fn test_clear() {
        let store = MemoryStore::new();
        let repository = repo(&store);
        repository.save(&WorkoutCollection::new()).unwrap();
        assert_eq!(store.load(keys::WORKOUTS).unwrap().as_deref(), Some("[]"));

        repository.clear().unwrap();
        assert!(store.is_empty());
    }
}
