//! TMDB (The Movie Database) API client.
//!
//! TMDB requires an API key for access.
//! Rate limits are generous (around 40 requests per second).

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{Genre, MovieSummary, Review};
use super::{CatalogError, MovieCatalog, SEARCH_RESULT_LIMIT};
use crate::metrics::{EXTERNAL_SERVICE_DURATION, EXTERNAL_SERVICE_REQUESTS};

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// TMDB API key (required).
    #[serde(default)]
    pub api_key: String,
    /// Base URL (default: https://api.themoviedb.org/3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

/// TMDB API client.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Result<Self, CatalogError> {
        if config.api_key.is_empty() {
            return Err(CatalogError::NotConfigured(
                "TMDB API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let base_url = config
            .base_url
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
        })
    }

    /// Issue a GET against `path` and decode the JSON body.
    ///
    /// `what` names the resource in NotFound errors.
    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        params: &[(&str, String)],
        what: impl FnOnce() -> String,
    ) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.base_url, path);
        let start = Instant::now();

        let result = self.send(&url, params, what).await;

        EXTERNAL_SERVICE_DURATION
            .with_label_values(&["tmdb", operation])
            .observe(start.elapsed().as_secs_f64());
        EXTERNAL_SERVICE_REQUESTS
            .with_label_values(&[
                "tmdb",
                operation,
                if result.is_ok() { "success" } else { "error" },
            ])
            .inc();

        result
    }

    async fn send<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
        what: impl FnOnce() -> String,
    ) -> Result<T, CatalogError> {
        let response = self
            .client
            .get(url)
            .query(&[("api_key", &self.api_key)])
            .query(params)
            .send()
            .await
            // The URL carries the API key.
            .map_err(|e| e.without_url())?;

        let status = response.status();
        if status == 401 {
            return Err(CatalogError::NotConfigured(
                "Invalid TMDB API key".to_string(),
            ));
        }
        if status == 404 {
            return Err(CatalogError::NotFound(what()));
        }
        if status == 429 {
            return Err(CatalogError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::ParseError(format!("{}: {}", url, e.without_url())))
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn list_popular(&self, page: u32) -> Result<Vec<MovieSummary>, CatalogError> {
        debug!("TMDB popular movies: page={}", page);

        let listing: TmdbPage<TmdbMovieResult> = self
            .get_json(
                "popular",
                "/movie/popular",
                &[("page", page.to_string())],
                || format!("Popular page {}", page),
            )
            .await?;

        Ok(listing.results.into_iter().map(Into::into).collect())
    }

    async fn search_movies(&self, query: &str) -> Result<Vec<MovieSummary>, CatalogError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        debug!("TMDB movie search: query='{}'", query);

        let listing: TmdbPage<TmdbMovieResult> = self
            .get_json(
                "search",
                "/search/movie",
                &[
                    ("query", query.to_string()),
                    ("include_adult", "false".to_string()),
                ],
                || format!("Search '{}'", query),
            )
            .await?;

        Ok(listing
            .results
            .into_iter()
            .take(SEARCH_RESULT_LIMIT)
            .map(Into::into)
            .collect())
    }

    async fn get_movie(&self, movie_id: u32) -> Result<MovieSummary, CatalogError> {
        debug!("TMDB get movie: id={}", movie_id);

        let movie: TmdbMovieResult = self
            .get_json("movie", &format!("/movie/{}", movie_id), &[], || {
                format!("Movie ID {}", movie_id)
            })
            .await?;

        Ok(movie.into())
    }

    async fn get_reviews(&self, movie_id: u32) -> Result<Vec<Review>, CatalogError> {
        debug!("TMDB reviews: movie={}", movie_id);

        let listing: TmdbPage<TmdbReviewResult> = self
            .get_json(
                "reviews",
                &format!("/movie/{}/reviews", movie_id),
                &[],
                || format!("Reviews for movie ID {}", movie_id),
            )
            .await?;

        Ok(listing.results.into_iter().map(Into::into).collect())
    }

    async fn get_genres(&self) -> Result<Vec<Genre>, CatalogError> {
        debug!("TMDB genre list");

        let list: TmdbGenreList = self
            .get_json("genres", "/genre/movie/list", &[], || {
                "Movie genre list".to_string()
            })
            .await?;

        Ok(list
            .genres
            .into_iter()
            .map(|g| Genre {
                id: g.id,
                name: g.name,
            })
            .collect())
    }
}

// ============================================================================
// TMDB API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct TmdbPage<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

/// Shared shape of list entries and `/movie/{id}` details.
///
/// Listings carry `genre_ids`; the details endpoint carries `genres` objects
/// instead.
#[derive(Debug, Deserialize)]
struct TmdbMovieResult {
    id: u32,
    title: String,
    release_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    #[serde(default)]
    genre_ids: Vec<u32>,
    #[serde(default)]
    genres: Vec<TmdbGenre>,
}

#[derive(Debug, Deserialize)]
struct TmdbGenre {
    id: u32,
    name: String,
}

#[derive(Debug, Deserialize)]
struct TmdbGenreList {
    #[serde(default)]
    genres: Vec<TmdbGenre>,
}

#[derive(Debug, Deserialize)]
struct TmdbReviewResult {
    id: String,
    author: String,
    #[serde(default)]
    content: String,
    created_at: Option<String>,
    author_details: Option<TmdbAuthorDetails>,
}

#[derive(Debug, Deserialize)]
struct TmdbAuthorDetails {
    rating: Option<f32>,
}

// ============================================================================
// Conversions
// ============================================================================

impl From<TmdbMovieResult> for MovieSummary {
    fn from(r: TmdbMovieResult) -> Self {
        let genre_ids = if r.genres.is_empty() {
            r.genre_ids
        } else {
            r.genres.into_iter().map(|g| g.id).collect()
        };

        Self {
            id: r.id,
            title: r.title,
            release_date: r.release_date.unwrap_or_default(),
            genre_ids,
            poster_path: r.poster_path,
            overview: r.overview.filter(|o| !o.is_empty()),
        }
    }
}

impl From<TmdbReviewResult> for Review {
    fn from(r: TmdbReviewResult) -> Self {
        Self {
            id: r.id,
            author: r.author,
            content: r.content,
            created_at: r.created_at,
            rating: r.author_details.and_then(|d| d.rating),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_api_key() {
        let result = TmdbClient::new(TmdbConfig::default());
        assert!(matches!(result, Err(CatalogError::NotConfigured(_))));
    }

    #[test]
    fn test_new_trims_base_url() {
        let client = TmdbClient::new(TmdbConfig {
            api_key: "key".to_string(),
            base_url: Some("http://localhost:9999/3/".to_string()),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(client.base_url, "http://localhost:9999/3");
    }

    #[test]
    fn test_listing_entry_conversion() {
        let json = r#"{
            "id": 603,
            "title": "The Matrix",
            "release_date": "1999-03-30",
            "overview": "A computer hacker...",
            "poster_path": "/poster.jpg",
            "genre_ids": [28, 878]
        }"#;

        let result: TmdbMovieResult = serde_json::from_str(json).unwrap();
        let movie: MovieSummary = result.into();
        assert_eq!(movie.id, 603);
        assert_eq!(movie.year(), Some(1999));
        assert_eq!(movie.genre_ids, vec![28, 878]);
        assert_eq!(movie.poster_path.as_deref(), Some("/poster.jpg"));
    }

    #[test]
    fn test_details_genres_normalized_to_ids() {
        let json = r#"{
            "id": 603,
            "title": "The Matrix",
            "release_date": "1999-03-30",
            "runtime": 136,
            "genres": [
                {"id": 28, "name": "Action"},
                {"id": 878, "name": "Science Fiction"}
            ]
        }"#;

        let result: TmdbMovieResult = serde_json::from_str(json).unwrap();
        let movie: MovieSummary = result.into();
        assert_eq!(movie.genre_ids, vec![28, 878]);
        assert!(movie.poster_path.is_none());
    }

    #[test]
    fn test_null_release_date_becomes_empty() {
        let json = r#"{"id": 1, "title": "Unreleased", "release_date": null}"#;

        let result: TmdbMovieResult = serde_json::from_str(json).unwrap();
        let movie: MovieSummary = result.into();
        assert_eq!(movie.release_date, "");
        assert_eq!(movie.year(), None);
    }

    #[test]
    fn test_review_conversion_reads_author_rating() {
        let json = r#"{
            "results": [
                {
                    "id": "5f1",
                    "author": "grumpy",
                    "content": "Two hours I will never get back.",
                    "created_at": "2021-01-01T00:00:00.000Z",
                    "author_details": {"name": "", "rating": 2.0}
                },
                {
                    "id": "5f2",
                    "author": "quiet",
                    "content": "No score given.",
                    "author_details": {"rating": null}
                }
            ]
        }"#;

        let page: TmdbPage<TmdbReviewResult> = serde_json::from_str(json).unwrap();
        let reviews: Vec<Review> = page.results.into_iter().map(Into::into).collect();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].rating, Some(2.0));
        assert_eq!(reviews[1].rating, None);
        assert!(reviews[1].created_at.is_none());
    }
}
