//! Curated wallpaper catalog and the pure helpers the preference store builds on.

use std::sync::OnceLock;

use url::Url;

use crate::{generated::CURATED_WALLPAPER_CATALOG_JSON, model::Wallpaper};

/// Path suffixes accepted as direct image links (compared case-insensitively).
pub const IMAGE_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".webp", ".gif"];
/// Query keys that mark CDN-resized images served without a file extension.
pub const IMAGE_SIZE_QUERY_KEYS: [&str; 2] = ["w", "width"];
/// Prefix of every generated custom wallpaper id.
pub const CUSTOM_WALLPAPER_ID_PREFIX: &str = "custom";

const ID_SUFFIX_LEN: usize = 9;
const ID_SUFFIX_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Returns the built-in wallpapers in display order.
pub fn curated_wallpapers() -> &'static [Wallpaper] {
    static CATALOG: OnceLock<Vec<Wallpaper>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        serde_json::from_str(CURATED_WALLPAPER_CATALOG_JSON)
            .expect("generated curated wallpaper catalog should parse")
    })
}

/// Returns whether `wallpaper_id` names a built-in wallpaper.
pub fn is_curated_wallpaper_id(wallpaper_id: &str) -> bool {
    curated_wallpapers()
        .iter()
        .any(|wallpaper| wallpaper.id == wallpaper_id)
}

/// Iterates curated wallpapers followed by `custom`, the order used by the wallpaper picker.
pub fn all_wallpapers(custom: &[Wallpaper]) -> impl Iterator<Item = &Wallpaper> {
    curated_wallpapers().iter().chain(custom.iter())
}

/// Looks up a wallpaper by id across curated then custom entries; the first match wins.
pub fn get_wallpaper_by_id<'a>(
    wallpaper_id: &str,
    custom: &'a [Wallpaper],
) -> Option<&'a Wallpaper> {
    all_wallpapers(custom).find(|wallpaper| wallpaper.id == wallpaper_id)
}

/// Returns whether `url` looks like a direct image link.
///
/// The input must parse as an absolute URL. It is accepted when its path ends with one of
/// [`IMAGE_EXTENSIONS`] or its query carries one of [`IMAGE_SIZE_QUERY_KEYS`].
pub fn is_valid_image_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };

    let path = parsed.path().to_ascii_lowercase();
    let has_image_extension = IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext));
    let has_size_param = parsed
        .query_pairs()
        .any(|(key, _)| IMAGE_SIZE_QUERY_KEYS.contains(&key.as_ref()));

    has_image_extension || has_size_param
}

/// Generates an id for a user-added wallpaper: prefix, unix milliseconds, random base36 suffix.
///
/// Uniqueness is probabilistic only.
pub fn generate_wallpaper_id() -> String {
    format!(
        "{CUSTOM_WALLPAPER_ID_PREFIX}-{}-{}",
        prefs_host::unix_time_ms_now(),
        random_suffix()
    )
}

#[cfg(not(target_arch = "wasm32"))]
fn random_suffix() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    (0..ID_SUFFIX_LEN)
        .map(|_| ID_SUFFIX_ALPHABET[rng.random_range(0..ID_SUFFIX_ALPHABET.len())] as char)
        .collect()
}

#[cfg(target_arch = "wasm32")]
fn random_suffix() -> String {
    (0..ID_SUFFIX_LEN)
        .map(|_| {
            let index = (js_sys::Math::random() * ID_SUFFIX_ALPHABET.len() as f64) as usize;
            ID_SUFFIX_ALPHABET[index.min(ID_SUFFIX_ALPHABET.len() - 1)] as char
        })
        .collect()
}
