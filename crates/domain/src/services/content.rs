//! Values derived from blog content: reading time, excerpt and clap bounds.

use lazy_static::lazy_static;
use regex::Regex;

/// Average reading speed used for reading-time estimates.
pub const WORDS_PER_MINUTE: usize = 200;

/// Length of an auto-generated excerpt, in characters.
pub const EXCERPT_LENGTH: usize = 160;

pub const MIN_CLAPS_PER_REQUEST: i64 = 1;
pub const MAX_CLAPS_PER_REQUEST: i64 = 50;

lazy_static! {
    static ref CODE_BLOCK: Regex = Regex::new(r"(?s)```.*?```").unwrap();
    static ref IMAGE: Regex = Regex::new(r"!\[[^\]]*\]\([^)]*\)").unwrap();
    static ref LINK: Regex = Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap();
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
    static ref LINE_MARKERS: Regex = Regex::new(r"(?m)^\s*(#{1,6}\s+|>\s?|[-*+]\s+|\d+\.\s+)").unwrap();
    static ref INLINE_MARKERS: Regex = Regex::new(r"[*_~`]+").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Estimated minutes to read `content`: words / 200 rounded up, at least 1.
pub fn reading_time_minutes(content: &str) -> i32 {
    let words = content.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    i32::try_from(minutes).unwrap_or(i32::MAX)
}

/// Removes common markdown syntax and collapses whitespace.
pub fn strip_markdown(content: &str) -> String {
    let text = CODE_BLOCK.replace_all(content, " ");
    let text = IMAGE.replace_all(&text, " ");
    let text = LINK.replace_all(&text, "$1");
    let text = HTML_TAG.replace_all(&text, " ");
    let text = LINE_MARKERS.replace_all(&text, "");
    let text = INLINE_MARKERS.replace_all(&text, "");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// First 160 characters of the de-marked content, with an ellipsis when cut.
pub fn derive_excerpt(content: &str) -> String {
    let plain = strip_markdown(content);
    if plain.chars().count() <= EXCERPT_LENGTH {
        return plain;
    }
    let cut: String = plain.chars().take(EXCERPT_LENGTH).collect();
    format!("{}...", cut.trim_end())
}

/// Clamps a requested clap count to the per-request bounds; absent means 1.
pub fn clamp_claps(requested: Option<i64>, max: i64) -> i64 {
    let max = max.clamp(MIN_CLAPS_PER_REQUEST, MAX_CLAPS_PER_REQUEST);
    requested
        .unwrap_or(MIN_CLAPS_PER_REQUEST)
        .clamp(MIN_CLAPS_PER_REQUEST, max)
}
