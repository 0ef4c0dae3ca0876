//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with mock dependencies injected, enabling E2E testing of the game API
//! without reaching TMDB or the translation service.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use panned_core::{
    testing::{MockMovieCatalog, MockTranslator},
    Config, GameConfig, GameService, JwtSessionCodec, MovieCatalog, SessionCodec, Translator,
};

/// Re-export fixtures for test convenience
pub use panned_core::testing::fixtures;

/// Secret the fixture signs round tokens with.
pub const TEST_SECRET: &str = "test-secret";

/// Test fixture for E2E testing with mock dependencies.
///
/// Provides an in-process server with fully controllable mocks for:
/// - Movie catalog (MockMovieCatalog)
/// - Review translation (MockTranslator)
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_start() {
///     let fixture = TestFixture::new().await;
///     fixture.seed_puzzle().await;
///
///     let response = fixture.get("/api/v1/game/start").await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock catalog - configure movies, reviews and genres
    pub catalog: Arc<MockMovieCatalog>,
    /// Mock translator - configure translations and failures
    pub translator: Arc<MockTranslator>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture with default mocks.
    pub async fn new() -> Self {
        Self::with_static_dir(None).await
    }

    /// Create a test fixture serving the browser client from `static_dir`.
    pub async fn with_static_dir(static_dir: Option<PathBuf>) -> Self {
        let catalog = Arc::new(MockMovieCatalog::new());
        let translator = Arc::new(MockTranslator::new());
        catalog.set_genres(fixtures::genres()).await;

        let mut config = Config::default();
        config.tmdb.api_key = "test-key".to_string();
        config.session.secret = TEST_SECRET.to_string();
        config.server.static_dir = static_dir;
        config.game = GameConfig {
            max_attempts: 3,
            batch_timeout_secs: 1,
            ..GameConfig::default()
        };

        let game = GameService::new(
            Arc::clone(&catalog) as Arc<dyn MovieCatalog>,
            Arc::clone(&translator) as Arc<dyn Translator>,
            Arc::new(JwtSessionCodec::from_config(&config.session)) as Arc<dyn SessionCodec>,
            &config.game,
            &config.translation.target_language,
        )
        .with_seed(42);

        let state = Arc::new(panned_server::state::AppState::new(config, Arc::new(game)));
        let router = panned_server::api::create_router(state);

        Self {
            router,
            catalog,
            translator,
        }
    }

    /// Stock the catalog with one playable movie (id 42, "Nightfall", 1999,
    /// Action/Adventure) and a few guessable ones.
    pub async fn seed_puzzle(&self) {
        self.catalog
            .set_popular_fallback(vec![fixtures::movie(42, "Nightfall", "1999-10-31", &[28, 12])])
            .await;
        self.catalog
            .set_reviews(
                42,
                fixtures::reviews_mentioning("Nightfall", &[60, 80, 95, 110, 130]),
            )
            .await;
        self.catalog
            .add_movie(fixtures::movie(7, "Nightmare Alley", "2005-02-01", &[12, 16]))
            .await;
        self.catalog
            .add_movie(fixtures::movie(8, "Old Dud", "1990-02-01", &[18]))
            .await;
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    /// Send a GET request and return the raw body.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        (status, String::from_utf8_lossy(&body_bytes).into_owned())
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        self.send(request_builder.body(body).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}
