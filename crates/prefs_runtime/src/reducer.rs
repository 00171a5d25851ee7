//! Reducer actions, side-effect intents, and transition logic for user preferences.

use thiserror::Error;

use crate::{
    model::{PreferenceState, Wallpaper, WallpaperCategory, DEFAULT_CUSTOM_WALLPAPER_NAME},
    wallpaper,
};

#[derive(Debug, Clone, PartialEq)]
/// Input for a new user-added wallpaper. Identity and timestamp are chosen by the caller so the
/// transition itself stays deterministic.
pub struct CustomWallpaperDraft {
    /// Freshly generated wallpaper id.
    pub id: String,
    /// Raw display name; trimmed, with a default when empty.
    pub name: String,
    /// Candidate image URL.
    pub url: String,
    /// Catalog category.
    pub category: WallpaperCategory,
    /// Creation time in unix milliseconds.
    pub created_at: u64,
}

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_preferences`] to mutate [`PreferenceState`].
pub enum PreferencesAction {
    /// Show kana alongside romaji.
    SetDisplayKana {
        /// New value.
        enabled: bool,
    },
    /// Remember the selected theme id.
    SetTheme {
        /// Theme identifier.
        theme_id: String,
    },
    /// Toggle the translucent glass presentation mode.
    SetGlassMode {
        /// New value.
        enabled: bool,
    },
    /// Set the display font family.
    SetFont {
        /// Font family name.
        font_name: String,
    },
    /// Mute UI sounds.
    SetSilentMode {
        /// New value.
        enabled: bool,
    },
    /// Enable keyboard shortcuts.
    SetHotkeys {
        /// New value.
        enabled: bool,
    },
    /// Enable spoken pronunciation.
    SetPronunciationEnabled {
        /// New value.
        enabled: bool,
    },
    /// Set the speech rate multiplier.
    SetPronunciationSpeed {
        /// New rate.
        speed: f64,
    },
    /// Set the speech pitch multiplier.
    SetPronunciationPitch {
        /// New pitch.
        pitch: f64,
    },
    /// Choose a speech voice, or `None` for the platform default.
    SetPronunciationVoiceName {
        /// Voice name.
        voice_name: Option<String>,
    },
    /// Show furigana over kanji.
    SetFuriganaEnabled {
        /// New value.
        enabled: bool,
    },
    /// Preview themes on hover.
    SetThemePreview {
        /// New value.
        enabled: bool,
    },
    /// Point the wallpaper selection at an id (unchecked) or clear it.
    SetSelectedWallpaper {
        /// Wallpaper id.
        wallpaper_id: Option<String>,
    },
    /// Append a user-added wallpaper after URL validation.
    AddCustomWallpaper(CustomWallpaperDraft),
    /// Delete a user-added wallpaper, clearing the selection if it pointed there.
    RemoveCustomWallpaper {
        /// Wallpaper id.
        wallpaper_id: String,
    },
    /// Clear the wallpaper selection.
    ClearWallpaper,
    /// Replace the whole state with a rehydrated snapshot.
    Hydrate {
        /// Snapshot to restore.
        state: PreferenceState,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_preferences`] for the store to execute after commit.
pub enum RuntimeEffect {
    /// Write the committed snapshot to durable storage.
    PersistPreferences,
    /// Re-apply the palette of a theme id to the document.
    ApplyTheme(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for rejected actions. None of these change state.
pub enum ReducerError {
    /// A custom wallpaper URL is not a direct image link.
    #[error("invalid image url: {0}")]
    InvalidImageUrl(String),
    /// No custom wallpaper has the requested id.
    #[error("custom wallpaper not found: {0}")]
    WallpaperNotFound(String),
    /// The wallpaper is curated and cannot be deleted.
    #[error("cannot delete base wallpaper: {0}")]
    WallpaperNotDeletable(String),
}

/// Applies a [`PreferencesAction`] to the preference state and collects resulting side effects.
///
/// Callers that need atomic commits should reduce a copy of the committed snapshot and swap it in
/// only on `Ok`; every `Err` path returns before the first write to `state`.
///
/// # Errors
///
/// Returns [`ReducerError::InvalidImageUrl`] for a rejected custom wallpaper URL, and
/// [`ReducerError::WallpaperNotFound`] or [`ReducerError::WallpaperNotDeletable`] for a rejected
/// deletion.
pub fn reduce_preferences(
    state: &mut PreferenceState,
    action: PreferencesAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        PreferencesAction::SetDisplayKana { enabled } => state.display_kana = enabled,
        PreferencesAction::SetTheme { theme_id } => {
            state.theme = theme_id.clone();
            effects.push(RuntimeEffect::ApplyTheme(theme_id));
        }
        PreferencesAction::SetGlassMode { enabled } => state.glass_mode = enabled,
        PreferencesAction::SetFont { font_name } => state.font = font_name,
        PreferencesAction::SetSilentMode { enabled } => state.silent_mode = enabled,
        PreferencesAction::SetHotkeys { enabled } => state.hotkeys_on = enabled,
        PreferencesAction::SetPronunciationEnabled { enabled } => {
            state.pronunciation_enabled = enabled;
        }
        PreferencesAction::SetPronunciationSpeed { speed } => state.pronunciation_speed = speed,
        PreferencesAction::SetPronunciationPitch { pitch } => state.pronunciation_pitch = pitch,
        PreferencesAction::SetPronunciationVoiceName { voice_name } => {
            state.pronunciation_voice_name = voice_name;
        }
        PreferencesAction::SetFuriganaEnabled { enabled } => state.furigana_enabled = enabled,
        PreferencesAction::SetThemePreview { enabled } => state.theme_preview = enabled,
        PreferencesAction::SetSelectedWallpaper { wallpaper_id } => {
            state.selected_wallpaper_id = wallpaper_id;
        }
        PreferencesAction::AddCustomWallpaper(draft) => {
            state.custom_wallpapers.push(build_custom_wallpaper(draft)?);
        }
        PreferencesAction::RemoveCustomWallpaper { wallpaper_id } => {
            remove_custom_wallpaper(state, &wallpaper_id)?;
        }
        PreferencesAction::ClearWallpaper => state.selected_wallpaper_id = None,
        PreferencesAction::Hydrate { state: hydrated } => {
            *state = hydrated;
            effects.push(RuntimeEffect::ApplyTheme(state.theme.clone()));
            return Ok(effects);
        }
    }

    effects.push(RuntimeEffect::PersistPreferences);
    Ok(effects)
}

fn build_custom_wallpaper(draft: CustomWallpaperDraft) -> Result<Wallpaper, ReducerError> {
    if !wallpaper::is_valid_image_url(&draft.url) {
        return Err(ReducerError::InvalidImageUrl(draft.url));
    }

    let name = match draft.name.trim() {
        "" => DEFAULT_CUSTOM_WALLPAPER_NAME.to_string(),
        trimmed => trimmed.to_string(),
    };
    Ok(Wallpaper {
        id: draft.id,
        name,
        url: draft.url,
        thumbnail_url: None,
        category: draft.category,
        is_user_added: true,
        source: None,
        created_at: draft.created_at,
    })
}

fn remove_custom_wallpaper(
    state: &mut PreferenceState,
    wallpaper_id: &str,
) -> Result<(), ReducerError> {
    let index = state
        .custom_wallpapers
        .iter()
        .position(|wallpaper| wallpaper.id == wallpaper_id)
        .ok_or_else(|| ReducerError::WallpaperNotFound(wallpaper_id.to_string()))?;
    if !state.custom_wallpapers[index].is_user_added {
        return Err(ReducerError::WallpaperNotDeletable(wallpaper_id.to_string()));
    }

    state.custom_wallpapers.remove(index);
    if state.selected_wallpaper_id.as_deref() == Some(wallpaper_id) {
        state.selected_wallpaper_id = None;
    }
    Ok(())
}
