//! Review sanitization: translate, redact the title, flatten, truncate.

mod redact;
mod translate;

pub use redact::{
    flatten_newlines, significant_words, truncate_chars, TitleRedactor, TITLE_MARKER,
    WORD_MARKER,
};
pub use translate::{
    GoogleTranslator, PassthroughTranslator, TranslateError, TranslationConfig, Translator,
};

use std::sync::Arc;

use crate::catalog::Review;

/// Default maximum length of a delivered review, in characters.
pub const DEFAULT_MAX_REVIEW_CHARS: usize = 600;

/// Turns raw review bodies into client-safe puzzle clues.
pub struct ReviewSanitizer {
    translator: Arc<dyn Translator>,
    target_language: String,
    max_chars: usize,
}

impl ReviewSanitizer {
    pub fn new(
        translator: Arc<dyn Translator>,
        target_language: impl Into<String>,
        max_chars: usize,
    ) -> Self {
        Self {
            translator,
            target_language: target_language.into(),
            max_chars,
        }
    }

    /// Sanitize one review body.
    ///
    /// Translation happens before redaction, and the original (untranslated)
    /// title is what gets redacted. Translation failures fall back to the
    /// untranslated text.
    pub async fn sanitize(&self, review: &str, title: &str) -> String {
        self.sanitize_with(review, &TitleRedactor::new(title)).await
    }

    async fn sanitize_with(&self, review: &str, redactor: &TitleRedactor) -> String {
        let translated = self
            .translator
            .transform(review, &self.target_language)
            .await;
        let redacted = redactor.redact(&translated);
        let flattened = flatten_newlines(&redacted);
        truncate_chars(&flattened, self.max_chars)
    }

    /// Sanitize reviews shortest first until `limit` usable ones are found.
    ///
    /// Reviews that come out blank are skipped and the next longer review
    /// takes their place. The result holds fewer than `limit` entries only
    /// when the input runs out.
    pub async fn sanitize_shortest(
        &self,
        reviews: &[Review],
        title: &str,
        limit: usize,
    ) -> Vec<String> {
        let mut sorted: Vec<&Review> = reviews.iter().collect();
        sorted.sort_by_key(|r| r.content_len());

        let redactor = TitleRedactor::new(title);
        let mut cleaned = Vec::with_capacity(limit);
        for review in sorted {
            if cleaned.len() >= limit {
                break;
            }
            let text = self.sanitize_with(&review.content, &redactor).await;
            if !text.trim().is_empty() {
                cleaned.push(text);
            }
        }

        cleaned
    }
}
