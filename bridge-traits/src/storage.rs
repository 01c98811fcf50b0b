//! Key-Value Storage Abstraction
//!
//! A synchronous string slot store modeled on browser `localStorage`:
//! - Desktop: one file per key under the application data directory
//! - Web: `window.localStorage`
//! - Tests: [`MemoryStore`]
//!
//! Calls never suspend, so callers can read and write from inside
//! synchronous code paths.

use parking_lot::Mutex;
use std::collections::HashMap;

use crate::error::{BridgeError, Result};
use crate::platform::PlatformSendSync;

/// Persistent string key-value store.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::storage::KeyValueStore;
///
/// fn remember(store: &dyn KeyValueStore, payload: &str) -> Result<()> {
///     store.set_item("exercise-video-cache", payload)
/// }
/// ```
pub trait KeyValueStore: PlatformSendSync {
    /// Read a slot. Missing slots are `Ok(None)`.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Write a slot, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::QuotaExceeded`] when the backing store is full.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a slot. Removing a missing slot is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// In-process store with an optional byte quota.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes that would push the total stored bytes past `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
            quota_bytes: Some(bytes),
        }
    }

    /// Seed a slot without quota checks.
    pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        self.items.lock().insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.lock();
        if let Some(limit) = self.quota_bytes {
            let others: usize = items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > limit {
                return Err(BridgeError::QuotaExceeded(format!(
                    "{needed} bytes requested, {limit} allowed"
                )));
            }
        }
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("missing").unwrap(), None);

        store.set_item("slot", "value").unwrap();
        assert_eq!(store.get_item("slot").unwrap().as_deref(), Some("value"));

        store.set_item("slot", "other").unwrap();
        assert_eq!(store.get_item("slot").unwrap().as_deref(), Some("other"));
        assert_eq!(store.len(), 1);

        store.remove_item("slot").unwrap();
        assert!(store.is_empty());
        store.remove_item("slot").unwrap();
    }

    #[test]
    fn test_memory_store_quota() {
        let store = MemoryStore::with_quota(10);
        store.set_item("k", "123456789").unwrap();

        let err = store.set_item("k", "1234567890").unwrap_err();
        assert!(matches!(err, BridgeError::QuotaExceeded(_)));
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("123456789"));

        // Replacing a slot only counts the new value.
        store.set_item("k", "1").unwrap();
        assert!(store.set_item("j", "12345678").is_err());
        store.set_item("j", "1234567").unwrap();
    }

    #[test]
    fn test_store_is_object_safe() {
        let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        store.set_item("a", "b").unwrap();
        assert_eq!(store.get_item("a").unwrap().as_deref(), Some("b"));
    }
}
