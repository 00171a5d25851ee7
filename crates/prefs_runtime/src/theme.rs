//! Theme catalog and the theme-application entry point.
//!
//! The store only remembers the selected theme id. Turning that id into document variables is a
//! separate, idempotent call that the caller re-issues on every load and every change.

use std::sync::OnceLock;

use leptos::logging;
use prefs_host::{PaletteSink, ThemePalette};
use serde::Deserialize;

use crate::generated::THEME_CATALOG_JSON;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// One named palette.
pub struct Theme {
    /// Stable identifier persisted in preferences.
    pub id: String,
    /// Colors written to the document when the theme is applied.
    pub palette: ThemePalette,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// A labelled set of themes shown together in the picker.
pub struct ThemeGroup {
    /// Group heading.
    pub name: String,
    /// Themes in display order.
    pub themes: Vec<Theme>,
}

/// Returns every theme group in display order.
pub fn theme_groups() -> &'static [ThemeGroup] {
    static CATALOG: OnceLock<Vec<ThemeGroup>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        serde_json::from_str(THEME_CATALOG_JSON).expect("generated theme catalog should parse")
    })
}

/// Returns a theme by id across all groups.
pub fn theme_by_id(theme_id: &str) -> Option<&'static Theme> {
    theme_groups()
        .iter()
        .flat_map(|group| group.themes.iter())
        .find(|theme| theme.id == theme_id)
}

/// Returns the label shown for a theme id in the picker.
pub fn theme_display_name(theme_id: &str) -> String {
    theme_id.replace('-', " ")
}

/// Resolves `theme_id` and writes its full palette through `sink`.
///
/// Returns `false` without touching the sink when the id is unknown, and `false` when the sink
/// rejects the write. Both cases are logged.
pub fn apply_theme(theme_id: &str, sink: &dyn PaletteSink) -> bool {
    let Some(theme) = theme_by_id(theme_id) else {
        logging::warn!("unknown theme id: {theme_id}");
        return false;
    };
    match sink.apply_palette(&theme.palette) {
        Ok(()) => true,
        Err(err) => {
            logging::warn!("apply theme {theme_id} failed: {err}");
            false
        }
    }
}
