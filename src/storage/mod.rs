//! Key-value persistence (local storage equivalent).

pub mod file;
pub mod memory;
pub mod repository;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use repository::WorkoutRepository;

/// Storage key names as constants.
pub mod keys {
    /// Serialized workout collection
    pub const WORKOUTS: &str = "workouts";
}

/// Minimal string key-value store.
///
/// Writes are synchronous: `save` returns once the value is durable for the
/// backend in question.
pub trait KeyValueStore: Send + Sync {
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Returns `None` when nothing is stored under `key`.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Errors from storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// Keys become file names, so keep them to a safe alphabet.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
