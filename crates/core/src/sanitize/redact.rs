//! Title redaction for review text.

use regex::{Regex, RegexBuilder};

/// Replacement for a full title match.
pub const TITLE_MARKER: &str = "███████";

/// Replacement for a single title word.
pub const WORD_MARKER: &str = "...";

/// Title words too common to redact on their own.
const STOPWORDS: &[&str] = &["the", "and", "for", "with"];

/// Title words shorter than this are never redacted on their own.
const MIN_WORD_LEN: usize = 3;

/// Removes every mention of a movie title from review text.
///
/// Two passes: the whole title (case-insensitive, literal), then each
/// significant title word as a whole word. Case folding and word boundaries
/// are Unicode-aware. Misspellings and title words embedded in longer words
/// are not caught.
#[derive(Debug, Clone)]
pub struct TitleRedactor {
    full_title: Option<Regex>,
    words: Vec<Regex>,
}

impl TitleRedactor {
    pub fn new(title: &str) -> Self {
        let title = title.trim();

        // An empty pattern would match between every character.
        let full_title = if title.is_empty() {
            None
        } else {
            case_insensitive(&regex::escape(title))
        };

        let words = significant_words(title)
            .into_iter()
            .filter_map(|word| case_insensitive(&format!(r"\b{}\b", regex::escape(word))))
            .collect();

        Self { full_title, words }
    }

    /// Apply both redaction passes.
    pub fn redact(&self, text: &str) -> String {
        let mut redacted = match &self.full_title {
            Some(re) => re.replace_all(text, TITLE_MARKER).into_owned(),
            None => text.to_string(),
        };

        for word in &self.words {
            redacted = word.replace_all(&redacted, WORD_MARKER).into_owned();
        }

        redacted
    }
}

fn case_insensitive(pattern: &str) -> Option<Regex> {
    RegexBuilder::new(pattern).case_insensitive(true).build().ok()
}

/// Title words worth redacting individually.
pub fn significant_words(title: &str) -> Vec<&str> {
    title
        .split_whitespace()
        .filter(|w| w.chars().count() >= MIN_WORD_LEN)
        .filter(|w| !STOPWORDS.iter().any(|s| s.eq_ignore_ascii_case(w)))
        .collect()
}

/// Collapse every line break (`\r\n`, `\n`, `\r`) into a single space.
pub fn flatten_newlines(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

/// Cut `text` to at most `max_chars` characters, ending in an ellipsis when
/// anything was removed.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let keep = max_chars.saturating_sub(WORD_MARKER.len());
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(WORD_MARKER);
    truncated
}
