use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const CATALOG_SCHEMA_VERSION: u32 = 1;
const WALLPAPER_CATEGORIES: [&str; 6] = [
    "neon-cyberpunk",
    "nature",
    "abstract",
    "minimal",
    "anime",
    "custom",
];

#[derive(Debug, Deserialize)]
struct WallpaperCatalogFile {
    schema_version: u32,
    wallpaper: Vec<WallpaperEntry>,
}

#[derive(Debug, Deserialize)]
struct WallpaperEntry {
    id: String,
    name: String,
    url: String,
    thumbnail_url: Option<String>,
    category: String,
    source: Option<String>,
    created_at: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedWallpaper {
    id: String,
    name: String,
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    thumbnail_url: Option<String>,
    category: String,
    is_user_added: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    created_at: u64,
}

#[derive(Debug, Deserialize)]
struct ThemeCatalogFile {
    schema_version: u32,
    group: Vec<ThemeGroupEntry>,
}

#[derive(Debug, Deserialize)]
struct ThemeGroupEntry {
    name: String,
    theme: Vec<ThemeEntry>,
}

#[derive(Debug, Deserialize)]
struct ThemeEntry {
    id: String,
    background: String,
    main: String,
    secondary: String,
    border: String,
    card: String,
}

#[derive(Debug, Serialize)]
struct GeneratedThemeGroup {
    name: String,
    themes: Vec<GeneratedTheme>,
}

#[derive(Debug, Serialize)]
struct GeneratedTheme {
    id: String,
    palette: GeneratedPalette,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedPalette {
    background_color: String,
    main_color: String,
    secondary_color: String,
    border_color: String,
    card_color: String,
}

fn read_catalog(path: &Path) -> String {
    println!("cargo:rerun-if-changed={}", path.display());
    fs::read_to_string(path).unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()))
}

fn check_schema(path: &Path, found: u32) {
    if found != CATALOG_SCHEMA_VERSION {
        panic!(
            "catalog schema mismatch in {}: expected {CATALOG_SCHEMA_VERSION} found {found}",
            path.display()
        );
    }
}

fn wallpaper_catalog(path: &Path) -> Vec<GeneratedWallpaper> {
    let file: WallpaperCatalogFile = toml::from_str(&read_catalog(path))
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    check_schema(path, file.schema_version);

    let mut seen = HashSet::new();
    file.wallpaper
        .into_iter()
        .map(|entry| {
            if !seen.insert(entry.id.clone()) {
                panic!("duplicate curated wallpaper id `{}`", entry.id);
            }
            if entry.id.starts_with("custom-") {
                panic!("curated wallpaper id `{}` uses the custom prefix", entry.id);
            }
            if !WALLPAPER_CATEGORIES.contains(&entry.category.as_str()) {
                panic!(
                    "wallpaper `{}` has unknown category `{}`",
                    entry.id, entry.category
                );
            }
            if entry.name.trim().is_empty() || entry.url.trim().is_empty() {
                panic!("wallpaper `{}` needs a name and url", entry.id);
            }
            GeneratedWallpaper {
                id: entry.id,
                name: entry.name,
                url: entry.url,
                thumbnail_url: entry.thumbnail_url,
                category: entry.category,
                is_user_added: false,
                source: entry.source,
                created_at: entry.created_at,
            }
        })
        .collect()
}

fn theme_catalog(path: &Path) -> Vec<GeneratedThemeGroup> {
    let file: ThemeCatalogFile = toml::from_str(&read_catalog(path))
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    check_schema(path, file.schema_version);

    let mut seen = HashSet::new();
    file.group
        .into_iter()
        .map(|group| GeneratedThemeGroup {
            name: group.name,
            themes: group
                .theme
                .into_iter()
                .map(|theme| {
                    if !seen.insert(theme.id.clone()) {
                        panic!("duplicate theme id `{}`", theme.id);
                    }
                    for color in [
                        &theme.background,
                        &theme.main,
                        &theme.secondary,
                        &theme.border,
                        &theme.card,
                    ] {
                        if !color.starts_with('#') {
                            panic!("theme `{}` has non-hex color `{color}`", theme.id);
                        }
                    }
                    GeneratedTheme {
                        id: theme.id,
                        palette: GeneratedPalette {
                            background_color: theme.background,
                            main_color: theme.main,
                            secondary_color: theme.secondary,
                            border_color: theme.border,
                            card_color: theme.card,
                        },
                    }
                })
                .collect(),
        })
        .collect()
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let catalog_dir = crate_root.join("catalog");

    let wallpapers = wallpaper_catalog(&catalog_dir.join("wallpapers.toml"));
    let themes = theme_catalog(&catalog_dir.join("themes.toml"));
    if !themes
        .iter()
        .flat_map(|group| &group.themes)
        .any(|theme| theme.id == "light")
    {
        panic!("theme catalog must define the default `light` theme");
    }

    let wallpapers_json =
        serde_json::to_string_pretty(&wallpapers).expect("serialize wallpaper catalog");
    let themes_json = serde_json::to_string_pretty(&themes).expect("serialize theme catalog");
    let generated = format!(
        "/// Build-time generated curated wallpaper catalog JSON.\n\
pub const CURATED_WALLPAPER_CATALOG_JSON: &str = r##\"{wallpapers_json}\"##;\n\
/// Build-time generated theme catalog JSON.\n\
pub const THEME_CATALOG_JSON: &str = r##\"{themes_json}\"##;\n"
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
