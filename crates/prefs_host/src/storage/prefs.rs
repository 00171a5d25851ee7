//! Lightweight preference storage contracts and adapters.
//!
//! Every call is synchronous: the preference store persists after each committed transition
//! and never suspends.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures reported by [`PrefsStore`] implementations and the typed helpers.
pub enum PrefsStoreError {
    /// The durable backend is not reachable on the active host.
    #[error("preference storage unavailable")]
    Unavailable,
    /// The backend rejected a read, write, or delete.
    #[error("preference storage {op} failed: {message}")]
    Backend {
        /// Storage operation that failed.
        op: &'static str,
        /// Backend-provided detail.
        message: String,
    },
    /// A stored value could not be encoded or decoded as JSON.
    #[error("preference serialization failed: {0}")]
    Serialization(String),
}

/// Host service for lightweight preference values (JSON stored as text per key).
pub trait PrefsStore {
    /// Loads a raw JSON string for a preference key.
    fn load_pref(&self, key: &str) -> Result<Option<String>, PrefsStoreError>;

    /// Saves a raw JSON string for a preference key.
    fn save_pref(&self, key: &str, raw_json: &str) -> Result<(), PrefsStoreError>;

    /// Deletes a preference key.
    fn delete_pref(&self, key: &str) -> Result<(), PrefsStoreError>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op preference store for unsupported targets and baseline tests.
pub struct NoopPrefsStore;

impl PrefsStore for NoopPrefsStore {
    fn load_pref(&self, _key: &str) -> Result<Option<String>, PrefsStoreError> {
        Ok(None)
    }

    fn save_pref(&self, _key: &str, _raw_json: &str) -> Result<(), PrefsStoreError> {
        Ok(())
    }

    fn delete_pref(&self, _key: &str) -> Result<(), PrefsStoreError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory preference store keyed by string.
///
/// Clones share the same backing map, so a test can keep one handle while the store under test
/// owns another.
pub struct MemoryPrefsStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryPrefsStore {
    /// Returns the raw JSON currently stored for `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }

    /// Returns how many keys are stored.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns whether no key is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn load_pref(&self, key: &str) -> Result<Option<String>, PrefsStoreError> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn save_pref(&self, key: &str, raw_json: &str) -> Result<(), PrefsStoreError> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), raw_json.to_string());
        Ok(())
    }

    fn delete_pref(&self, key: &str) -> Result<(), PrefsStoreError> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}

/// Loads and deserializes a typed preference value through a [`PrefsStore`] implementation.
///
/// # Errors
///
/// Returns an error when the store or JSON deserialization fails.
pub fn load_pref_with<S: PrefsStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, PrefsStoreError> {
    let Some(raw) = store.load_pref(key)? else {
        return Ok(None);
    };
    let value =
        serde_json::from_str(&raw).map_err(|e| PrefsStoreError::Serialization(e.to_string()))?;
    Ok(Some(value))
}

/// Serializes and saves a typed preference value through a [`PrefsStore`] implementation.
///
/// # Errors
///
/// Returns an error when serialization or store save fails.
pub fn save_pref_with<S: PrefsStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), PrefsStoreError> {
    let raw =
        serde_json::to_string(value).map_err(|e| PrefsStoreError::Serialization(e.to_string()))?;
    store.save_pref(key, &raw)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct PrefThing {
        glass: bool,
    }

    #[test]
    fn memory_prefs_store_round_trip_and_delete() {
        let store = MemoryPrefsStore::default();
        let store_obj: &dyn PrefsStore = &store;

        store_obj.save_pref("pref.key", "{\"k\":1}").expect("save");
        assert_eq!(
            store_obj.load_pref("pref.key").expect("load"),
            Some("{\"k\":1}".to_string())
        );
        store_obj.delete_pref("pref.key").expect("delete");
        assert_eq!(store_obj.load_pref("pref.key").expect("load"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn memory_prefs_store_clones_share_backing_map() {
        let store = MemoryPrefsStore::default();
        let handle = store.clone();
        store.save_pref("theme-storage", "{}").expect("save");
        assert_eq!(handle.raw("theme-storage"), Some("{}".to_string()));
        assert_eq!(handle.len(), 1);
    }

    #[test]
    fn typed_pref_helpers_round_trip() {
        let store = MemoryPrefsStore::default();
        save_pref_with(&store, "prefs", &PrefThing { glass: true }).expect("save typed pref");

        let loaded: Option<PrefThing> = load_pref_with(&store, "prefs").expect("load typed pref");
        assert_eq!(loaded, Some(PrefThing { glass: true }));
    }

    #[test]
    fn typed_load_reports_malformed_json() {
        let store = MemoryPrefsStore::default();
        store.save_pref("prefs", "{not json").expect("save");
        let err = load_pref_with::<_, PrefThing>(&store, "prefs").expect_err("decode failure");
        assert!(matches!(err, PrefsStoreError::Serialization(_)));
    }

    #[test]
    fn noop_prefs_store_is_empty_and_successful() {
        let store = NoopPrefsStore;
        let store_obj: &dyn PrefsStore = &store;
        assert_eq!(store_obj.load_pref("k").expect("load"), None);
        store_obj.save_pref("k", "{}").expect("save");
        store_obj.delete_pref("k").expect("delete");
    }
}
