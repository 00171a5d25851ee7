//! Long-lived preference container: committed snapshot, reducer dispatch, and effect execution.
//!
//! Every mutator reduces a copy of the committed snapshot and swaps it in only when the
//! transition succeeds, then runs the emitted effects in order. Persistence happens after commit
//! and a failed write is logged, never rolled back.

use std::rc::Rc;

use leptos::logging;
use prefs_host::{PaletteSink, PreferencesHost, PrefsStore};

use crate::{
    model::{PreferenceState, Wallpaper, WallpaperCategory},
    persistence::{self, LoadedPreferences, SnapshotSource},
    reducer::{
        reduce_preferences, CustomWallpaperDraft, PreferencesAction, ReducerError, RuntimeEffect,
    },
    theme, wallpaper,
};

/// Sole owner of the user's preference snapshot.
pub struct PreferenceStore {
    state: PreferenceState,
    prefs: Rc<dyn PrefsStore>,
    palette: Option<Rc<dyn PaletteSink>>,
}

impl PreferenceStore {
    /// Rehydrates from `prefs`, falling back to defaults for missing or unreadable records.
    ///
    /// No palette sink is attached; theme effects are skipped until one is.
    pub fn hydrate(prefs: Rc<dyn PrefsStore>) -> Self {
        let LoadedPreferences { state, source } = persistence::load_preferences(prefs.as_ref());
        if source != SnapshotSource::Defaults {
            logging::log!("preferences rehydrated ({source:?})");
        }
        Self {
            state,
            prefs,
            palette: None,
        }
    }

    /// Rehydrates from the host bundle and applies the stored theme to the document.
    pub fn from_host(host: &PreferencesHost) -> Self {
        let mut store = Self::hydrate(Rc::clone(&host.prefs));
        store.palette = Some(Rc::clone(&host.palette));
        store.apply_selected_theme();
        store
    }

    /// Attaches a palette sink so theme changes are applied as they are committed.
    pub fn with_palette(mut self, palette: Rc<dyn PaletteSink>) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Returns the committed snapshot.
    pub fn state(&self) -> &PreferenceState {
        &self.state
    }

    /// Resolves the selected wallpaper id against curated and custom wallpapers.
    pub fn selected_wallpaper(&self) -> Option<&Wallpaper> {
        let wallpaper_id = self.state.selected_wallpaper_id.as_deref()?;
        wallpaper::get_wallpaper_by_id(wallpaper_id, &self.state.custom_wallpapers)
    }

    /// Returns curated then custom wallpapers in picker order.
    pub fn all_wallpapers(&self) -> Vec<&Wallpaper> {
        wallpaper::all_wallpapers(&self.state.custom_wallpapers).collect()
    }

    /// Re-applies the selected theme through the attached sink. Returns `false` if no sink is
    /// attached or the theme could not be applied.
    pub fn apply_selected_theme(&self) -> bool {
        match &self.palette {
            Some(sink) => theme::apply_theme(&self.state.theme, sink.as_ref()),
            None => false,
        }
    }

    /// Runs one transition atomically and executes its effects.
    ///
    /// # Errors
    ///
    /// Returns the reducer error unchanged; the committed snapshot is untouched in that case.
    pub fn dispatch(&mut self, action: PreferencesAction) -> Result<(), ReducerError> {
        let mut next = self.state.clone();
        let effects = reduce_preferences(&mut next, action)?;
        self.state = next;
        for effect in effects {
            self.run_effect(effect);
        }
        Ok(())
    }

    fn run_effect(&self, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::PersistPreferences => {
                if let Err(err) = persistence::save_preferences(self.prefs.as_ref(), &self.state) {
                    logging::warn!("persist preferences failed: {err}");
                }
            }
            RuntimeEffect::ApplyTheme(theme_id) => {
                if let Some(sink) = &self.palette {
                    theme::apply_theme(&theme_id, sink.as_ref());
                }
            }
        }
    }

    fn dispatch_infallible(&mut self, action: PreferencesAction) {
        if let Err(err) = self.dispatch(action) {
            logging::error!("preference update rejected: {err}");
        }
    }

    pub fn set_display_kana(&mut self, enabled: bool) {
        self.dispatch_infallible(PreferencesAction::SetDisplayKana { enabled });
    }

    pub fn set_theme(&mut self, theme_id: impl Into<String>) {
        self.dispatch_infallible(PreferencesAction::SetTheme {
            theme_id: theme_id.into(),
        });
    }

    pub fn set_glass_mode(&mut self, enabled: bool) {
        self.dispatch_infallible(PreferencesAction::SetGlassMode { enabled });
    }

    pub fn set_font(&mut self, font_name: impl Into<String>) {
        self.dispatch_infallible(PreferencesAction::SetFont {
            font_name: font_name.into(),
        });
    }

    pub fn set_silent_mode(&mut self, enabled: bool) {
        self.dispatch_infallible(PreferencesAction::SetSilentMode { enabled });
    }

    pub fn set_hotkeys(&mut self, enabled: bool) {
        self.dispatch_infallible(PreferencesAction::SetHotkeys { enabled });
    }

    pub fn set_pronunciation_enabled(&mut self, enabled: bool) {
        self.dispatch_infallible(PreferencesAction::SetPronunciationEnabled { enabled });
    }

    pub fn set_pronunciation_speed(&mut self, speed: f64) {
        self.dispatch_infallible(PreferencesAction::SetPronunciationSpeed { speed });
    }

    pub fn set_pronunciation_pitch(&mut self, pitch: f64) {
        self.dispatch_infallible(PreferencesAction::SetPronunciationPitch { pitch });
    }

    pub fn set_pronunciation_voice_name(&mut self, voice_name: Option<String>) {
        self.dispatch_infallible(PreferencesAction::SetPronunciationVoiceName { voice_name });
    }

    pub fn set_furigana_enabled(&mut self, enabled: bool) {
        self.dispatch_infallible(PreferencesAction::SetFuriganaEnabled { enabled });
    }

    pub fn set_theme_preview(&mut self, enabled: bool) {
        self.dispatch_infallible(PreferencesAction::SetThemePreview { enabled });
    }

    /// Selects a wallpaper by id without checking that it exists, or clears with `None`.
    pub fn set_selected_wallpaper(&mut self, wallpaper_id: Option<String>) {
        self.dispatch_infallible(PreferencesAction::SetSelectedWallpaper { wallpaper_id });
    }

    /// Adds a user wallpaper. Returns `false`, leaving state unchanged, when `url` is not a
    /// direct image link.
    pub fn add_custom_wallpaper(
        &mut self,
        name: &str,
        url: &str,
        category: Option<WallpaperCategory>,
    ) -> bool {
        let draft = CustomWallpaperDraft {
            id: wallpaper::generate_wallpaper_id(),
            name: name.to_string(),
            url: url.to_string(),
            category: category.unwrap_or_default(),
            created_at: prefs_host::unix_time_ms_now(),
        };
        match self.dispatch(PreferencesAction::AddCustomWallpaper(draft)) {
            Ok(()) => true,
            Err(err) => {
                logging::error!("{err}");
                false
            }
        }
    }

    /// Removes a user wallpaper, clearing the selection if it pointed there. Unknown ids and
    /// curated wallpapers are left alone with a warning.
    pub fn remove_custom_wallpaper(&mut self, wallpaper_id: &str) {
        if let Err(err) = self.dispatch(PreferencesAction::RemoveCustomWallpaper {
            wallpaper_id: wallpaper_id.to_string(),
        }) {
            logging::warn!("{err}");
        }
    }

    pub fn clear_wallpaper(&mut self) {
        self.dispatch_infallible(PreferencesAction::ClearWallpaper);
    }
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("state", &self.state)
            .field("palette_attached", &self.palette.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use prefs_host::{
        HostStrategy, MemoryPaletteSink, MemoryPrefsStore, PrefsStoreError,
    };

    use super::*;
    use crate::persistence::{load_preferences, PREFERENCES_STORAGE_KEY};

    struct FailingPrefsStore;

    impl PrefsStore for FailingPrefsStore {
        fn load_pref(&self, _key: &str) -> Result<Option<String>, PrefsStoreError> {
            Err(PrefsStoreError::Unavailable)
        }

        fn save_pref(&self, _key: &str, _raw_json: &str) -> Result<(), PrefsStoreError> {
            Err(PrefsStoreError::Unavailable)
        }

        fn delete_pref(&self, _key: &str) -> Result<(), PrefsStoreError> {
            Err(PrefsStoreError::Unavailable)
        }
    }

    fn memory_store() -> (PreferenceStore, MemoryPrefsStore) {
        let prefs = MemoryPrefsStore::default();
        (PreferenceStore::hydrate(Rc::new(prefs.clone())), prefs)
    }

    #[test]
    fn fresh_store_starts_from_defaults_without_writing() {
        let (store, prefs) = memory_store();
        assert_eq!(store.state(), &PreferenceState::default());
        assert!(prefs.is_empty());
    }

    #[test]
    fn every_mutation_persists_the_full_snapshot() {
        let (mut store, prefs) = memory_store();
        store.set_font("Klee One");
        store.set_furigana_enabled(true);
        store.set_pronunciation_pitch(1.25);

        let persisted = load_preferences(&prefs);
        assert_eq!(&persisted.state, store.state());
        assert_eq!(persisted.state.font, "Klee One");
        assert!(persisted.state.furigana_enabled);
    }

    #[test]
    fn add_custom_wallpaper_defaults_name_and_generates_id() {
        let (mut store, _prefs) = memory_store();
        assert!(store.add_custom_wallpaper("", "https://x.com/a.jpg", None));
        assert!(store.add_custom_wallpaper("", "https://x.com/b.jpg", None));

        let custom = &store.state().custom_wallpapers;
        assert_eq!(custom.len(), 2);
        assert_eq!(custom[0].name, "Custom Wallpaper");
        assert!(custom[0].is_user_added);
        assert_eq!(custom[0].category, WallpaperCategory::Custom);
        assert!(custom[0].id.starts_with("custom-"));
        assert_ne!(custom[0].id, custom[1].id);
        assert!(!wallpaper::is_curated_wallpaper_id(&custom[0].id));
    }

    #[test]
    fn add_custom_wallpaper_keeps_requested_category() {
        let (mut store, _prefs) = memory_store();
        assert!(store.add_custom_wallpaper(
            "Totoro",
            "https://img.cdn/t?width=600",
            Some(WallpaperCategory::Anime)
        ));
        assert_eq!(
            store.state().custom_wallpapers[0].category,
            WallpaperCategory::Anime
        );
    }

    #[test]
    fn rejected_add_leaves_state_and_storage_untouched() {
        let (mut store, prefs) = memory_store();
        assert!(!store.add_custom_wallpaper("X", "https://x.com/a.psd", None));
        assert!(store.state().custom_wallpapers.is_empty());
        assert_eq!(prefs.raw(PREFERENCES_STORAGE_KEY), None);
    }

    #[test]
    fn removing_curated_or_unknown_ids_is_a_no_op() {
        let (mut store, prefs) = memory_store();
        assert!(store.add_custom_wallpaper("Mine", "https://x.com/a.png", None));
        store.set_selected_wallpaper(Some("tokyo-rain".to_string()));
        let before = store.state().clone();
        let raw_before = prefs.raw(PREFERENCES_STORAGE_KEY);

        store.remove_custom_wallpaper("tokyo-rain");
        store.remove_custom_wallpaper("custom-0-missing");

        assert_eq!(store.state(), &before);
        assert_eq!(prefs.raw(PREFERENCES_STORAGE_KEY), raw_before);
    }

    #[test]
    fn removing_selected_custom_wallpaper_clears_selection() {
        let (mut store, prefs) = memory_store();
        assert!(store.add_custom_wallpaper("Mine", "https://x.com/a.png", None));
        let id = store.state().custom_wallpapers[0].id.clone();
        store.set_selected_wallpaper(Some(id.clone()));
        assert_eq!(store.selected_wallpaper().map(|w| w.id.as_str()), Some(id.as_str()));

        store.remove_custom_wallpaper(&id);

        assert!(store.state().custom_wallpapers.is_empty());
        assert_eq!(store.state().selected_wallpaper_id, None);
        assert_eq!(load_preferences(&prefs).state.selected_wallpaper_id, None);
    }

    #[test]
    fn selected_wallpaper_resolves_curated_entries_and_ignores_dangling_ids() {
        let (mut store, _prefs) = memory_store();
        store.set_selected_wallpaper(Some("sakura-night".to_string()));
        assert_eq!(
            store.selected_wallpaper().map(|w| w.name.as_str()),
            Some("Sakura Night")
        );

        store.set_selected_wallpaper(Some("nowhere".to_string()));
        assert_eq!(store.state().selected_wallpaper_id.as_deref(), Some("nowhere"));
        assert!(store.selected_wallpaper().is_none());

        store.clear_wallpaper();
        assert_eq!(store.state().selected_wallpaper_id, None);
        store.clear_wallpaper();
        assert_eq!(store.state().selected_wallpaper_id, None);
    }

    #[test]
    fn persistence_failures_do_not_roll_back() {
        let mut store = PreferenceStore::hydrate(Rc::new(FailingPrefsStore));
        assert_eq!(store.state(), &PreferenceState::default());
        store.set_silent_mode(true);
        assert!(store.state().silent_mode);
    }

    #[test]
    fn rehydration_restores_the_previous_session() {
        let prefs = MemoryPrefsStore::default();
        {
            let mut first = PreferenceStore::hydrate(Rc::new(prefs.clone()));
            first.set_theme("dracula");
            assert!(first.add_custom_wallpaper("Sunset", "https://cdn/s.webp", None));
        }
        let second = PreferenceStore::hydrate(Rc::new(prefs));
        assert_eq!(second.state().theme, "dracula");
        assert_eq!(second.state().custom_wallpapers[0].name, "Sunset");
    }

    #[test]
    fn host_store_applies_theme_on_load_and_on_change() {
        let prefs = MemoryPrefsStore::default();
        let palette = MemoryPaletteSink::default();
        let host = PreferencesHost::new(
            Rc::new(prefs),
            Rc::new(palette.clone()),
            HostStrategy::Stub,
        );

        let mut store = PreferenceStore::from_host(&host);
        assert_eq!(palette.applied_count(), 1);
        assert_eq!(
            palette.variable("--background-color"),
            Some(theme::theme_by_id("light").expect("light").palette.background_color.clone())
        );

        store.set_theme("nord");
        assert_eq!(palette.applied_count(), 2);
        assert_eq!(
            palette.variable("--main-color"),
            Some(theme::theme_by_id("nord").expect("nord").palette.main_color.clone())
        );

        store.set_font("Noto Sans JP");
        assert_eq!(palette.applied_count(), 2);
    }

    #[test]
    fn unknown_theme_is_remembered_but_not_applied() {
        let palette = MemoryPaletteSink::default();
        let (store, _prefs) = memory_store();
        let mut store = store.with_palette(Rc::new(palette.clone()));
        store.set_theme("retired-theme");
        assert_eq!(store.state().theme, "retired-theme");
        assert_eq!(palette.applied_count(), 0);
        assert!(!store.apply_selected_theme());
    }
}
