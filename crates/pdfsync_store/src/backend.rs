//! The key/value backend trait.

use crate::error::StoreResult;

/// A durable string store keyed by short stable keys.
///
/// This is the persistence surface the engine consumes: values are
/// opaque strings (the engine serializes JSON into them), and the only
/// guarantee across writers is last-write-wins.
pub trait KeyValueBackend: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// A reader must never observe a partially written value.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes every listed key. Missing keys are not an error.
    fn remove_many(&self, keys: &[&str]) -> StoreResult<()>;
}
