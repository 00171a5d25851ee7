//! Leptos provider and context wiring for the preference store.
//!
//! The context owns the long-lived [`PreferenceStore`] and mirrors its committed snapshot into a
//! signal so views re-render after every successful mutation.

use leptos::*;
use prefs_host::PreferencesHost;

use crate::{
    model::{PreferenceState, WallpaperCategory},
    reducer::{PreferencesAction, ReducerError},
    store::PreferenceStore,
};

#[derive(Clone, Copy)]
/// Leptos context for reading preference state and invoking store mutators.
pub struct PreferencesContext {
    /// Reactive copy of the committed snapshot.
    pub state: RwSignal<PreferenceState>,
    store: StoredValue<PreferenceStore>,
}

impl PreferencesContext {
    /// Wraps an already hydrated store.
    pub fn new(store: PreferenceStore) -> Self {
        let state = create_rw_signal(store.state().clone());
        Self {
            state,
            store: store_value(store),
        }
    }

    /// Runs `f` against the store and publishes the resulting snapshot if it changed.
    ///
    /// Returns `None` once the owning reactive scope has been disposed.
    pub fn update<R>(&self, f: impl FnOnce(&mut PreferenceStore) -> R) -> Option<R> {
        let (result, next) = self.store.try_update_value(|store| {
            let result = f(store);
            (result, store.state().clone())
        })?;
        if self.state.with_untracked(|current| current != &next) {
            self.state.set(next);
        }
        Some(result)
    }

    /// Dispatches a reducer action through the store.
    pub fn dispatch_action(&self, action: PreferencesAction) -> Result<(), ReducerError> {
        self.update(|store| store.dispatch(action))
            .unwrap_or(Ok(()))
    }

    /// Adds a user wallpaper; `false` means the URL was rejected.
    pub fn add_custom_wallpaper(
        &self,
        name: &str,
        url: &str,
        category: Option<WallpaperCategory>,
    ) -> bool {
        self.update(|store| store.add_custom_wallpaper(name, url, category))
            .unwrap_or(false)
    }

    /// Removes a user wallpaper by id.
    pub fn remove_custom_wallpaper(&self, wallpaper_id: &str) {
        self.update(|store| store.remove_custom_wallpaper(wallpaper_id));
    }

    /// Clears the wallpaper selection.
    pub fn clear_wallpaper(&self) {
        self.update(PreferenceStore::clear_wallpaper);
    }
}

#[component]
/// Provides [`PreferencesContext`] to descendant components and rehydrates persisted state.
pub fn PreferencesProvider(
    /// Injected browser or stub host bundle assembled by the entry layer.
    host: PreferencesHost,
    children: Children,
) -> impl IntoView {
    let context = PreferencesContext::new(PreferenceStore::from_host(&host));
    provide_context(context);

    children().into_view()
}

/// Returns the current [`PreferencesContext`].
///
/// # Panics
///
/// Panics if called outside [`PreferencesProvider`].
pub fn use_preferences() -> PreferencesContext {
    use_context::<PreferencesContext>().expect("PreferencesContext not provided")
}
