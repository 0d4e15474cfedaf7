//! Key-value persistence collaborator.
//!
//! The pipeline itself is stateless; callers use a [`KeyValueStore`] to cache
//! the serialized dataset and session preferences between runs. A payload
//! that fails to deserialize is logged and treated as "no stored data",
//! never surfaced as a pipeline error.

pub mod file;
pub mod memory;

use insights_core::InsightsResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Get/set/remove of serialized text by string key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> InsightsResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> InsightsResult<()>;
    fn remove(&self, key: &str) -> InsightsResult<()>;
}

/// Load and deserialize a stored value. Missing keys, store failures, and
/// corrupt payloads all read as `None`.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(key, error = %e, "store read failed, treating as empty");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "stored payload is corrupt, treating as empty");
            None
        }
    }
}

/// Serialize and persist a value under the given key.
pub fn save_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> InsightsResult<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}
