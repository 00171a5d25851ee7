use std::rc::Rc;

use prefs_host::{
    HostStrategy, NoopPaletteSink, NoopPrefsStore, PaletteSink, PaletteSinkError,
    PreferencesHost, PrefsStore, PrefsStoreError, ThemePalette,
};

use crate::{WebPaletteSink, WebPrefsStore};

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "host-stub")]
    {
        HostStrategy::Stub
    }

    #[cfg(not(feature = "host-stub"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    selected_host_strategy().as_str()
}

/// Adapter enum that erases the concrete preference backend behind [`PrefsStore`].
#[derive(Debug, Clone, Copy)]
pub enum PrefsStoreAdapter {
    /// Browser-backed `localStorage` persistence.
    Browser(WebPrefsStore),
    /// No-op fallback for headless builds.
    Stub(NoopPrefsStore),
}

impl PrefsStore for PrefsStoreAdapter {
    fn load_pref(&self, key: &str) -> Result<Option<String>, PrefsStoreError> {
        match self {
            Self::Browser(store) => store.load_pref(key),
            Self::Stub(store) => store.load_pref(key),
        }
    }

    fn save_pref(&self, key: &str, raw_json: &str) -> Result<(), PrefsStoreError> {
        match self {
            Self::Browser(store) => store.save_pref(key, raw_json),
            Self::Stub(store) => store.save_pref(key, raw_json),
        }
    }

    fn delete_pref(&self, key: &str) -> Result<(), PrefsStoreError> {
        match self {
            Self::Browser(store) => store.delete_pref(key),
            Self::Stub(store) => store.delete_pref(key),
        }
    }
}

/// Adapter enum that erases the concrete document backend behind [`PaletteSink`].
#[derive(Debug, Clone, Copy)]
pub enum PaletteSinkAdapter {
    /// Browser document-style writer.
    Browser(WebPaletteSink),
    /// No-op fallback for headless builds.
    Stub(NoopPaletteSink),
}

impl PaletteSink for PaletteSinkAdapter {
    fn apply_palette(&self, palette: &ThemePalette) -> Result<(), PaletteSinkError> {
        match self {
            Self::Browser(sink) => sink.apply_palette(palette),
            Self::Stub(sink) => sink.apply_palette(palette),
        }
    }
}

/// Returns the preference store adapter for the selected host strategy.
pub fn prefs_store() -> PrefsStoreAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => PrefsStoreAdapter::Browser(WebPrefsStore),
        HostStrategy::Stub => PrefsStoreAdapter::Stub(NoopPrefsStore),
    }
}

/// Returns the palette sink adapter for the selected host strategy.
pub fn palette_sink() -> PaletteSinkAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => PaletteSinkAdapter::Browser(WebPaletteSink),
        HostStrategy::Stub => PaletteSinkAdapter::Stub(NoopPaletteSink),
    }
}

/// Assembles the host bundle injected into `prefs_runtime`.
pub fn build_preferences_host() -> PreferencesHost {
    PreferencesHost::new(
        Rc::new(prefs_store()),
        Rc::new(palette_sink()),
        selected_host_strategy(),
    )
}
