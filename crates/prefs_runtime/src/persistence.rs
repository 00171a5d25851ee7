//! Durable preference record: key, envelope shape, rehydration, and repair.
//!
//! The record lives under [`PREFERENCES_STORAGE_KEY`] as
//! `{"state": <PreferenceState>, "version": 0}`. Rehydration never fails: a missing record yields
//! defaults, a partially valid one is repaired key by key, and anything else resets to defaults.

use leptos::logging;
use prefs_host::{save_pref_with, PrefsStore, PrefsStoreError};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::model::{PreferenceState, Wallpaper};

/// Storage key holding the serialized preference record.
pub const PREFERENCES_STORAGE_KEY: &str = "theme-storage";
/// Schema version written into the record envelope.
pub const PREFERENCES_SCHEMA_VERSION: u32 = 0;

#[derive(Serialize)]
struct PersistedPreferences<'a> {
    state: &'a PreferenceState,
    version: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Where a rehydrated snapshot came from.
pub enum SnapshotSource {
    /// Nothing was stored, or storage could not be read.
    Defaults,
    /// The stored record decoded cleanly.
    Restored,
    /// The stored record decoded only after dropping invalid keys or wallpaper entries.
    Repaired,
    /// The stored record was unreadable and was ignored.
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
/// Result of [`load_preferences`].
pub struct LoadedPreferences {
    /// Snapshot to start the store with.
    pub state: PreferenceState,
    /// How the snapshot was obtained.
    pub source: SnapshotSource,
}

impl LoadedPreferences {
    fn defaults(source: SnapshotSource) -> Self {
        Self {
            state: PreferenceState::default(),
            source,
        }
    }
}

/// Loads the persisted preference snapshot, repairing or resetting malformed records.
pub fn load_preferences(store: &dyn PrefsStore) -> LoadedPreferences {
    let raw = match store.load_pref(PREFERENCES_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return LoadedPreferences::defaults(SnapshotSource::Defaults),
        Err(err) => {
            logging::warn!("preference load failed: {err}");
            return LoadedPreferences::defaults(SnapshotSource::Defaults);
        }
    };

    match decode_record(&raw) {
        Some(loaded) => {
            if loaded.source == SnapshotSource::Repaired {
                logging::warn!("repaired malformed fields in persisted preferences");
            }
            loaded
        }
        None => {
            logging::warn!("persisted preferences unreadable; using defaults");
            LoadedPreferences::defaults(SnapshotSource::Reset)
        }
    }
}

/// Writes the full snapshot to durable storage.
///
/// # Errors
///
/// Returns an error when serialization or the storage write fails.
pub fn save_preferences(
    store: &dyn PrefsStore,
    state: &PreferenceState,
) -> Result<(), PrefsStoreError> {
    save_pref_with(
        store,
        PREFERENCES_STORAGE_KEY,
        &PersistedPreferences {
            state,
            version: PREFERENCES_SCHEMA_VERSION,
        },
    )
}

fn decode_record(raw: &str) -> Option<LoadedPreferences> {
    let Value::Object(record) = serde_json::from_str::<Value>(raw).ok()? else {
        return None;
    };
    let version = match record.get("version") {
        None => PREFERENCES_SCHEMA_VERSION,
        Some(value) => u32::try_from(value.as_u64()?).ok()?,
    };
    let Some(Value::Object(state)) = record.get("state") else {
        return None;
    };
    migrate_preferences(version, state)
}

fn migrate_preferences(version: u32, state: &Map<String, Value>) -> Option<LoadedPreferences> {
    match version {
        0 => Some(decode_state(state)),
        _ => None,
    }
}

fn decode_state(object: &Map<String, Value>) -> LoadedPreferences {
    if let Ok(state) = serde_json::from_value::<PreferenceState>(Value::Object(object.clone())) {
        return LoadedPreferences {
            state,
            source: SnapshotSource::Restored,
        };
    }

    // Missing keys fall back to their defaults, so keys can be admitted one at a time.
    let mut accepted = Map::new();
    for (key, value) in object {
        let value = match key.as_str() {
            "customWallpapers" => retain_valid_wallpapers(value),
            _ => value.clone(),
        };
        let mut candidate = accepted.clone();
        candidate.insert(key.clone(), value);
        if serde_json::from_value::<PreferenceState>(Value::Object(candidate.clone())).is_ok() {
            accepted = candidate;
        }
    }

    LoadedPreferences {
        state: serde_json::from_value(Value::Object(accepted)).unwrap_or_default(),
        source: SnapshotSource::Repaired,
    }
}

fn retain_valid_wallpapers(value: &Value) -> Value {
    match value {
        Value::Array(entries) => Value::Array(
            entries
                .iter()
                .filter(|entry| serde_json::from_value::<Wallpaper>((*entry).clone()).is_ok())
                .cloned()
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use prefs_host::MemoryPrefsStore;
    use serde_json::json;

    use super::*;
    use crate::model::WallpaperCategory;

    fn stored(raw: &str) -> MemoryPrefsStore {
        let store = MemoryPrefsStore::default();
        store
            .save_pref(PREFERENCES_STORAGE_KEY, raw)
            .expect("seed record");
        store
    }

    fn custom_wallpaper(id: &str) -> Wallpaper {
        Wallpaper {
            id: id.to_string(),
            name: "Mine".to_string(),
            url: "https://x.com/a.gif".to_string(),
            thumbnail_url: None,
            category: WallpaperCategory::Anime,
            is_user_added: true,
            source: None,
            created_at: 7,
        }
    }

    #[test]
    fn missing_record_yields_defaults() {
        let loaded = load_preferences(&MemoryPrefsStore::default());
        assert_eq!(loaded, LoadedPreferences::defaults(SnapshotSource::Defaults));
    }

    #[test]
    fn saved_record_has_envelope_shape_and_round_trips() {
        let store = MemoryPrefsStore::default();
        let state = PreferenceState {
            theme: "matcha".to_string(),
            selected_wallpaper_id: Some("custom-1-a".to_string()),
            custom_wallpapers: vec![custom_wallpaper("custom-1-a")],
            ..PreferenceState::default()
        };
        save_preferences(&store, &state).expect("save");

        let raw = store.raw(PREFERENCES_STORAGE_KEY).expect("record written");
        let value: Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(value["version"], json!(0));
        assert_eq!(value["state"]["theme"], json!("matcha"));
        assert_eq!(value["state"]["selectedWallpaperId"], json!("custom-1-a"));

        let loaded = load_preferences(&store);
        assert_eq!(loaded.source, SnapshotSource::Restored);
        assert_eq!(loaded.state, state);
    }

    #[test]
    fn dangling_selection_is_restored_verbatim() {
        let store = stored(r#"{"state":{"selectedWallpaperId":"gone"},"version":0}"#);
        let loaded = load_preferences(&store);
        assert_eq!(loaded.source, SnapshotSource::Restored);
        assert_eq!(loaded.state.selected_wallpaper_id.as_deref(), Some("gone"));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let store = stored(r#"{"state":{"theme":"nord","silentMode":true},"version":0}"#);
        let loaded = load_preferences(&store);
        assert_eq!(loaded.source, SnapshotSource::Restored);
        assert_eq!(
            loaded.state,
            PreferenceState {
                theme: "nord".to_string(),
                silent_mode: true,
                ..PreferenceState::default()
            }
        );
    }

    #[test]
    fn invalid_fields_are_reset_individually() {
        let store = stored(
            r#"{"state":{"theme":"nord","hotkeysOn":"yes","pronunciationSpeed":1.5},"version":0}"#,
        );
        let loaded = load_preferences(&store);
        assert_eq!(loaded.source, SnapshotSource::Repaired);
        assert_eq!(loaded.state.theme, "nord");
        assert!(loaded.state.hotkeys_on);
        assert_eq!(loaded.state.pronunciation_speed, 1.5);
    }

    #[test]
    fn malformed_wallpaper_entries_are_dropped() {
        let good = serde_json::to_value(custom_wallpaper("custom-1-a")).expect("wallpaper json");
        let record = json!({
            "state": {
                "customWallpapers": [good, {"id": "custom-2-b", "category": "vaporwave"}],
                "font": "Klee One"
            },
            "version": 0
        });
        let loaded = load_preferences(&stored(&record.to_string()));
        assert_eq!(loaded.source, SnapshotSource::Repaired);
        assert_eq!(loaded.state.custom_wallpapers, vec![custom_wallpaper("custom-1-a")]);
        assert_eq!(loaded.state.font, "Klee One");
    }

    #[test]
    fn unreadable_records_reset_to_defaults() {
        for raw in [
            "{not json",
            "[]",
            r#"{"state":"oops","version":0}"#,
            r#"{"state":{},"version":3}"#,
            r#"{"version":0}"#,
        ] {
            let loaded = load_preferences(&stored(raw));
            assert_eq!(loaded, LoadedPreferences::defaults(SnapshotSource::Reset), "{raw}");
        }
    }

    #[test]
    fn record_without_version_is_read_as_current() {
        let loaded = load_preferences(&stored(r#"{"state":{"displayKana":true}}"#));
        assert_eq!(loaded.source, SnapshotSource::Restored);
        assert!(loaded.state.display_kana);
    }
}
