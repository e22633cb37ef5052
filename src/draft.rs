use once_cell::sync::Lazy;
use regex::Regex;

use crate::view::model::preview;

static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s]+").expect("valid url regex"));
static SENTENCE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("valid sentence regex"));

const PREVIEW_CHARS: usize = 200;

/// Live statistics shown while an email is being composed.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftStats {
    pub chars: usize,
    pub words: usize,
    pub sentences: usize,
    pub urls: usize,
    pub caps_percent: f64,
    pub preview: String,
}

pub fn analyze(text: &str) -> DraftStats {
    let chars = text.chars().count();
    let caps = text.chars().filter(char::is_ascii_uppercase).count();
    DraftStats {
        chars,
        words: text.split_whitespace().count(),
        sentences: SENTENCE_BREAK
            .split(text)
            .filter(|s| !s.trim().is_empty())
            .count(),
        urls: URL_REGEX.find_iter(text).count(),
        caps_percent: if chars > 0 {
            caps as f64 / chars as f64 * 100.0
        } else {
            0.0
        },
        preview: preview(text, PREVIEW_CHARS),
    }
}
