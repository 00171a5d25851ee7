use serde::{Deserialize, Serialize};

pub const DEFAULT_THEME_ID: &str = "light";
pub const DEFAULT_FONT: &str = "Zen Maru Gothic";
pub const DEFAULT_CUSTOM_WALLPAPER_NAME: &str = "Custom Wallpaper";
pub const DEFAULT_PRONUNCIATION_SPEED: f64 = 1.0;
pub const DEFAULT_PRONUNCIATION_PITCH: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WallpaperCategory {
    NeonCyberpunk,
    Nature,
    Abstract,
    Minimal,
    Anime,
    #[default]
    Custom,
}

impl WallpaperCategory {
    pub const ALL: [Self; 6] = [
        Self::NeonCyberpunk,
        Self::Nature,
        Self::Abstract,
        Self::Minimal,
        Self::Anime,
        Self::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NeonCyberpunk => "neon-cyberpunk",
            Self::Nature => "nature",
            Self::Abstract => "abstract",
            Self::Minimal => "minimal",
            Self::Anime => "anime",
            Self::Custom => "custom",
        }
    }
}

/// Background-image descriptor shared by curated and user-added wallpapers.
///
/// The serialized shape is the persisted record shape: camelCase keys, optional fields omitted
/// when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallpaper {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub category: WallpaperCategory,
    /// `false` for curated entries, which can never be removed.
    pub is_user_added: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Creation time in unix milliseconds.
    pub created_at: u64,
}

/// Full user preference snapshot.
///
/// `selected_wallpaper_id` is a weak reference into curated plus custom wallpapers; it is not
/// checked against either set when set or loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreferenceState {
    pub display_kana: bool,
    pub theme: String,
    #[serde(rename = "isGlassMode")]
    pub glass_mode: bool,
    pub font: String,
    pub silent_mode: bool,
    pub hotkeys_on: bool,
    pub pronunciation_enabled: bool,
    pub pronunciation_speed: f64,
    pub pronunciation_pitch: f64,
    pub pronunciation_voice_name: Option<String>,
    pub furigana_enabled: bool,
    pub theme_preview: bool,
    pub selected_wallpaper_id: Option<String>,
    pub custom_wallpapers: Vec<Wallpaper>,
}

impl Default for PreferenceState {
    fn default() -> Self {
        Self {
            display_kana: false,
            theme: DEFAULT_THEME_ID.to_string(),
            glass_mode: false,
            font: DEFAULT_FONT.to_string(),
            silent_mode: false,
            hotkeys_on: true,
            pronunciation_enabled: true,
            pronunciation_speed: DEFAULT_PRONUNCIATION_SPEED,
            pronunciation_pitch: DEFAULT_PRONUNCIATION_PITCH,
            pronunciation_voice_name: None,
            furigana_enabled: false,
            theme_preview: false,
            selected_wallpaper_id: None,
            custom_wallpapers: Vec::new(),
        }
    }
}
