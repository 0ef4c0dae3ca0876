//! Mock translator for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::sanitize::{TranslateError, Translator};

/// Mock implementation of the Translator trait.
///
/// Text without a configured translation is returned unchanged, which keeps
/// redaction assertions readable.
#[derive(Debug, Clone, Default)]
pub struct MockTranslator {
    /// Canned translations keyed by source text.
    translations: Arc<RwLock<HashMap<String, String>>>,
    /// Whether every call fails.
    failing: Arc<RwLock<bool>>,
    /// Artificial latency per call.
    delay: Arc<RwLock<Option<Duration>>>,
    /// Recorded (text, target language) pairs.
    calls: Arc<RwLock<Vec<(String, String)>>>,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the translation returned for `source`.
    pub async fn set_translation(&self, source: &str, translated: &str) {
        self.translations
            .write()
            .await
            .insert(source.to_string(), translated.to_string());
    }

    /// Make every call fail (or succeed again).
    pub async fn set_failing(&self, failing: bool) {
        *self.failing.write().await = failing;
    }

    /// Delay every call.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    /// Get all recorded calls.
    pub async fn calls(&self) -> Vec<(String, String)> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, TranslateError> {
        self.calls
            .write()
            .await
            .push((text.to_string(), target_language.to_string()));

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if *self.failing.read().await {
            return Err(TranslateError::Api {
                status: 503,
                message: "mock translator failing".to_string(),
            });
        }

        Ok(self
            .translations
            .read()
            .await
            .get(text)
            .cloned()
            .unwrap_or_else(|| text.to_string()))
    }
}
