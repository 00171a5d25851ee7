pub mod fonts;
pub mod model;
pub mod persistence;
pub mod reducer;
pub mod runtime_context;
pub mod store;
pub mod theme;
pub mod wallpaper;

mod generated {
    include!(concat!(env!("OUT_DIR"), "/catalog_generated.rs"));
}

pub use model::*;
pub use persistence::{
    load_preferences, save_preferences, LoadedPreferences, SnapshotSource,
    PREFERENCES_SCHEMA_VERSION, PREFERENCES_STORAGE_KEY,
};
pub use reducer::{
    reduce_preferences, CustomWallpaperDraft, PreferencesAction, ReducerError, RuntimeEffect,
};
pub use runtime_context::{use_preferences, PreferencesContext, PreferencesProvider};
pub use store::PreferenceStore;
pub use theme::{apply_theme, theme_by_id, theme_groups, Theme, ThemeGroup};
pub use wallpaper::{
    curated_wallpapers, generate_wallpaper_id, get_wallpaper_by_id, is_valid_image_url,
};

/// Builds a store wired to the compile-time selected browser or stub host.
pub fn browser_preference_store() -> PreferenceStore {
    PreferenceStore::from_host(&prefs_host_web::build_preferences_host())
}
