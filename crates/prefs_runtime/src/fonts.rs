//! Fonts recommended for reading Japanese, as used in textbooks and print.

/// Recommended font family names, default first.
pub const RECOMMENDED_FONT_NAMES: [&str; 8] = [
    "Zen Maru Gothic",
    "Noto Sans JP",
    "Klee One",
    "BIZ UDMincho",
    "Shippori Mincho",
    "M PLUS 1",
    "Sawarabi Gothic",
    "Zen Old Mincho",
];

/// Returns whether `font_name` is one of [`RECOMMENDED_FONT_NAMES`] (exact match).
pub fn is_recommended_font(font_name: &str) -> bool {
    RECOMMENDED_FONT_NAMES.contains(&font_name)
}
