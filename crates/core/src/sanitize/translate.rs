//! Translation of review text.
//!
//! Reviews are translated before redaction so the puzzle reads in the
//! player's language while proper nouns (which usually survive translation
//! untouched) are still caught by the title patterns.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::metrics::{EXTERNAL_SERVICE_DURATION, EXTERNAL_SERVICE_REQUESTS, TRANSLATION_FALLBACKS};

const DEFAULT_BASE_URL: &str = "https://translate.googleapis.com";

/// Errors that can occur while translating.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Translation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Whether reviews are translated at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Target language code (default: "fr").
    #[serde(default = "default_target_language")]
    pub target_language: String,
    /// Base URL (default: https://translate.googleapis.com).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds (default: 10).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_target_language() -> String {
    "fr".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            target_language: default_target_language(),
            base_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

/// Trait for translation backends.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Backend name (e.g., "google", "passthrough").
    fn name(&self) -> &str;

    /// Translate `text` into `target_language`.
    async fn translate(&self, text: &str, target_language: &str)
        -> Result<String, TranslateError>;

    /// Translate `text`, falling back to the original on any failure.
    async fn transform(&self, text: &str, target_language: &str) -> String {
        match self.translate(text, target_language).await {
            Ok(translated) => translated,
            Err(e) => {
                warn!("Translation via {} failed, keeping original: {}", self.name(), e);
                TRANSLATION_FALLBACKS.inc();
                text.to_string()
            }
        }
    }
}

/// Translator that returns text unchanged. Used when translation is disabled.
#[derive(Debug, Default)]
pub struct PassthroughTranslator;

#[async_trait]
impl Translator for PassthroughTranslator {
    fn name(&self) -> &str {
        "passthrough"
    }

    async fn translate(
        &self,
        text: &str,
        _target_language: &str,
    ) -> Result<String, TranslateError> {
        Ok(text.to_string())
    }
}

/// Client for Google's public `translate_a/single` endpoint.
pub struct GoogleTranslator {
    client: Client,
    base_url: String,
}

impl GoogleTranslator {
    pub fn new(config: &TranslationConfig) -> Result<Self, TranslateError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let base_url = config
            .base_url
            .as_deref()
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self { client, base_url })
    }

    async fn request(&self, text: &str, target_language: &str) -> Result<String, TranslateError> {
        let url = format!("{}/translate_a/single", self.base_url);

        debug!(
            "Translating {} chars to '{}'",
            text.chars().count(),
            target_language
        );

        // Reviews can exceed URL length limits, so the text goes in the body.
        let response = self
            .client
            .post(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_language),
                ("dt", "t"),
            ])
            .form(&[("q", text)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslateError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranslateError::Parse(e.to_string()))?;

        parse_segments(&body)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn name(&self) -> &str {
        "google"
    }

    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, TranslateError> {
        let start = Instant::now();
        let result = self.request(text, target_language).await;

        EXTERNAL_SERVICE_DURATION
            .with_label_values(&["translate", "translate"])
            .observe(start.elapsed().as_secs_f64());
        EXTERNAL_SERVICE_REQUESTS
            .with_label_values(&[
                "translate",
                "translate",
                if result.is_ok() { "success" } else { "error" },
            ])
            .inc();

        result
    }
}

/// Join the translated segments of a `translate_a/single` response.
///
/// The body is a nested array whose first element lists
/// `[translated, original, ...]` segments.
fn parse_segments(body: &serde_json::Value) -> Result<String, TranslateError> {
    let segments = body
        .get(0)
        .and_then(|s| s.as_array())
        .ok_or_else(|| TranslateError::Parse("missing segment list".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|t| t.as_str()))
        .collect();

    if translated.is_empty() {
        return Err(TranslateError::Parse("empty translation".to_string()));
    }

    Ok(translated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FailingTranslator;

    #[async_trait]
    impl Translator for FailingTranslator {
        fn name(&self) -> &str {
            "failing"
        }

        async fn translate(&self, _: &str, _: &str) -> Result<String, TranslateError> {
            Err(TranslateError::Api {
                status: 429,
                message: "Too Many Requests".to_string(),
            })
        }
    }

    #[test]
    fn test_parse_segments_joins_in_order() {
        let body = json!([
            [
                ["Quel ennui. ", "What a bore. ", null, null, 10],
                ["Je suis parti.", "I left.", null, null, 10]
            ],
            null,
            "en"
        ]);

        assert_eq!(
            parse_segments(&body).unwrap(),
            "Quel ennui. Je suis parti."
        );
    }

    #[test]
    fn test_parse_segments_rejects_unexpected_shape() {
        assert!(matches!(
            parse_segments(&json!({"error": "nope"})),
            Err(TranslateError::Parse(_))
        ));
        assert!(matches!(
            parse_segments(&json!([[]])),
            Err(TranslateError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_transform_falls_back_to_original() {
        let translator = FailingTranslator;
        let text = "Keep me exactly as I am.";

        assert_eq!(translator.transform(text, "fr").await, text);
    }

    #[tokio::test]
    async fn test_passthrough_returns_input() {
        let translator = PassthroughTranslator;
        assert_eq!(translator.transform("unchanged", "de").await, "unchanged");
    }

    #[test]
    fn test_config_defaults() {
        let config: TranslationConfig = toml::from_str("").unwrap();
        assert!(config.enabled);
        assert_eq!(config.target_language, "fr");
        assert_eq!(config.timeout_secs, 10);
        assert!(config.base_url.is_none());
    }
}
