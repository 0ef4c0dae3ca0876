//! Movie catalog integration.
//!
//! This module provides the client used to sample popular movies, look up
//! guesses, and pull the reviews that become puzzle clues.

mod reference;
mod tmdb;
mod types;

pub use reference::{CatalogReferenceCache, GenreTable};
pub use tmdb::{TmdbClient, TmdbConfig};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Maximum number of search results returned to the player.
pub const SEARCH_RESULT_LIMIT: usize = 5;

/// Errors that can occur when interacting with the movie catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Trait for movie catalog clients.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// List one page of the catalog's popular movies.
    async fn list_popular(&self, page: u32) -> Result<Vec<MovieSummary>, CatalogError>;

    /// Search for movies by title. Returns at most [`SEARCH_RESULT_LIMIT`] results.
    async fn search_movies(&self, query: &str) -> Result<Vec<MovieSummary>, CatalogError>;

    /// Get a specific movie by catalog ID.
    async fn get_movie(&self, movie_id: u32) -> Result<MovieSummary, CatalogError>;

    /// Get the user reviews for a movie.
    async fn get_reviews(&self, movie_id: u32) -> Result<Vec<Review>, CatalogError>;

    /// Get the full movie genre list.
    async fn get_genres(&self) -> Result<Vec<Genre>, CatalogError>;
}
