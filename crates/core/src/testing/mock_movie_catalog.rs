//! Mock movie catalog for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::catalog::{
    CatalogError, Genre, MovieCatalog, MovieSummary, Review, SEARCH_RESULT_LIMIT,
};

/// A recorded catalog query for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCatalogQuery {
    ListPopular { page: u32 },
    SearchMovies { query: String },
    GetMovie { movie_id: u32 },
    GetReviews { movie_id: u32 },
    GetGenres,
}

/// Mock implementation of the MovieCatalog trait.
///
/// Provides controllable behavior for testing:
/// - Serve configurable popular pages, movies, reviews and genres
/// - Track queries for assertions
/// - Simulate failures and slow review lookups
///
/// # Example
///
/// ```rust,ignore
/// use panned_core::testing::{MockMovieCatalog, fixtures};
///
/// let catalog = MockMovieCatalog::new();
/// let movie = fixtures::movie(42, "Nightfall", "2003-10-31", &[27]);
/// catalog.set_popular_fallback(vec![movie.clone()]).await;
/// catalog.set_reviews(42, fixtures::qualifying_reviews(&[60, 80, 95, 110, 130])).await;
/// ```
#[derive(Debug)]
pub struct MockMovieCatalog {
    /// Popular listing by page number.
    popular_pages: Arc<RwLock<HashMap<u32, Vec<MovieSummary>>>>,
    /// Popular listing served for pages without an explicit entry.
    popular_fallback: Arc<RwLock<Vec<MovieSummary>>>,
    /// Movies by ID (for get_movie and search).
    movies: Arc<RwLock<HashMap<u32, MovieSummary>>>,
    /// Reviews by movie ID.
    reviews: Arc<RwLock<HashMap<u32, Vec<Review>>>>,
    /// Genre list.
    genres: Arc<RwLock<Vec<Genre>>>,
    /// Artificial latency for review lookups, by movie ID.
    review_delays: Arc<RwLock<HashMap<u32, Duration>>>,
    /// Movie IDs whose review lookups always fail.
    failing_reviews: Arc<RwLock<HashSet<u32>>>,
    /// Whether every popular listing request fails.
    popular_unavailable: Arc<RwLock<bool>>,
    /// Recorded queries.
    queries: Arc<RwLock<Vec<RecordedCatalogQuery>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<CatalogError>>>,
}

impl Default for MockMovieCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMovieCatalog {
    /// Create a new empty mock catalog.
    pub fn new() -> Self {
        Self {
            popular_pages: Arc::new(RwLock::new(HashMap::new())),
            popular_fallback: Arc::new(RwLock::new(Vec::new())),
            movies: Arc::new(RwLock::new(HashMap::new())),
            reviews: Arc::new(RwLock::new(HashMap::new())),
            genres: Arc::new(RwLock::new(Vec::new())),
            review_delays: Arc::new(RwLock::new(HashMap::new())),
            failing_reviews: Arc::new(RwLock::new(HashSet::new())),
            popular_unavailable: Arc::new(RwLock::new(false)),
            queries: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    // =========================================================================
    // Popular listing
    // =========================================================================

    /// Set the movies listed on one popular page.
    ///
    /// Listed movies are also registered for `get_movie`.
    pub async fn set_popular_page(&self, page: u32, movies: Vec<MovieSummary>) {
        self.add_movies(&movies).await;
        self.popular_pages.write().await.insert(page, movies);
    }

    /// Set the movies listed on every page without an explicit entry.
    pub async fn set_popular_fallback(&self, movies: Vec<MovieSummary>) {
        self.add_movies(&movies).await;
        *self.popular_fallback.write().await = movies;
    }

    /// Make every popular listing request fail.
    pub async fn set_popular_unavailable(&self, unavailable: bool) {
        *self.popular_unavailable.write().await = unavailable;
    }

    // =========================================================================
    // Movies, reviews, genres
    // =========================================================================

    /// Add a movie.
    pub async fn add_movie(&self, movie: MovieSummary) {
        self.movies.write().await.insert(movie.id, movie);
    }

    async fn add_movies(&self, movies: &[MovieSummary]) {
        let mut map = self.movies.write().await;
        for movie in movies {
            map.insert(movie.id, movie.clone());
        }
    }

    /// Set the reviews for a movie.
    pub async fn set_reviews(&self, movie_id: u32, reviews: Vec<Review>) {
        self.reviews.write().await.insert(movie_id, reviews);
    }

    /// Set the genre list.
    pub async fn set_genres(&self, genres: Vec<Genre>) {
        *self.genres.write().await = genres;
    }

    /// Delay review lookups for a movie.
    pub async fn set_review_delay(&self, movie_id: u32, delay: Duration) {
        self.review_delays.write().await.insert(movie_id, delay);
    }

    /// Make review lookups for a movie fail.
    pub async fn fail_reviews_for(&self, movie_id: u32) {
        self.failing_reviews.write().await.insert(movie_id);
    }

    // =========================================================================
    // Query Recording
    // =========================================================================

    /// Get all recorded queries.
    pub async fn recorded_queries(&self) -> Vec<RecordedCatalogQuery> {
        self.queries.read().await.clone()
    }

    /// Clear recorded queries.
    pub async fn clear_recorded(&self) {
        self.queries.write().await.clear();
    }

    /// Get the number of queries performed.
    pub async fn query_count(&self) -> usize {
        self.queries.read().await.len()
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: CatalogError) {
        *self.next_error.write().await = Some(error);
    }

    async fn take_error(&self) -> Option<CatalogError> {
        self.next_error.write().await.take()
    }

    async fn record(&self, query: RecordedCatalogQuery) {
        self.queries.write().await.push(query);
    }
}

#[async_trait]
impl MovieCatalog for MockMovieCatalog {
    async fn list_popular(&self, page: u32) -> Result<Vec<MovieSummary>, CatalogError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.record(RecordedCatalogQuery::ListPopular { page }).await;

        if *self.popular_unavailable.read().await {
            return Err(CatalogError::ApiError {
                status: 503,
                message: "popular listing unavailable".to_string(),
            });
        }

        if let Some(movies) = self.popular_pages.read().await.get(&page) {
            return Ok(movies.clone());
        }
        Ok(self.popular_fallback.read().await.clone())
    }

    async fn search_movies(&self, query: &str) -> Result<Vec<MovieSummary>, CatalogError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.record(RecordedCatalogQuery::SearchMovies {
            query: query.to_string(),
        })
        .await;

        let query_lower = query.to_lowercase();
        let mut results: Vec<MovieSummary> = self
            .movies
            .read()
            .await
            .values()
            .filter(|m| m.title.to_lowercase().contains(&query_lower))
            .cloned()
            .collect();
        results.sort_by_key(|m| m.id);
        results.truncate(SEARCH_RESULT_LIMIT);

        Ok(results)
    }

    async fn get_movie(&self, movie_id: u32) -> Result<MovieSummary, CatalogError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.record(RecordedCatalogQuery::GetMovie { movie_id }).await;

        self.movies
            .read()
            .await
            .get(&movie_id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("Movie {} not found", movie_id)))
    }

    async fn get_reviews(&self, movie_id: u32) -> Result<Vec<Review>, CatalogError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.record(RecordedCatalogQuery::GetReviews { movie_id })
            .await;

        let delay = self.review_delays.read().await.get(&movie_id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing_reviews.read().await.contains(&movie_id) {
            return Err(CatalogError::ApiError {
                status: 500,
                message: format!("reviews for {} unavailable", movie_id),
            });
        }

        Ok(self
            .reviews
            .read()
            .await
            .get(&movie_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_genres(&self) -> Result<Vec<Genre>, CatalogError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.record(RecordedCatalogQuery::GetGenres).await;

        Ok(self.genres.read().await.clone())
    }
}
