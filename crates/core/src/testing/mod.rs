//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the external service traits,
//! allowing the selector, evaluator and HTTP layer to be exercised without
//! network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use panned_core::testing::{fixtures, MockMovieCatalog, MockTranslator};
//!
//! let catalog = MockMovieCatalog::new();
//! let translator = MockTranslator::new();
//!
//! // Configure mock responses
//! catalog.set_popular_fallback(vec![fixtures::movie(1, "Nightfall", "2003-10-31", &[27])]).await;
//! translator.set_failing(true).await;
//! ```

mod mock_movie_catalog;
mod mock_translator;

pub use mock_movie_catalog::{MockMovieCatalog, RecordedCatalogQuery};
pub use mock_translator::MockTranslator;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::catalog::{Genre, MovieSummary, Review};

    /// Create a test movie.
    pub fn movie(id: u32, title: &str, release_date: &str, genre_ids: &[u32]) -> MovieSummary {
        MovieSummary {
            id,
            title: title.to_string(),
            release_date: release_date.to_string(),
            genre_ids: genre_ids.to_vec(),
            poster_path: Some(format!("/poster-{}.jpg", id)),
            overview: Some(format!("A movie about {}.", title.to_lowercase())),
        }
    }

    /// Create a test review.
    pub fn review(id: &str, content: &str, rating: Option<f32>) -> Review {
        Review {
            id: id.to_string(),
            author: format!("critic-{}", id),
            content: content.to_string(),
            created_at: Some("2024-01-01T00:00:00.000Z".to_string()),
            rating,
        }
    }

    /// Create qualifying (rating 1.0) reviews of exactly the given lengths.
    pub fn qualifying_reviews(lengths: &[usize]) -> Vec<Review> {
        lengths
            .iter()
            .enumerate()
            .map(|(i, len)| review(&format!("q{}", i), &"a".repeat(*len), Some(1.0)))
            .collect()
    }

    /// Create qualifying reviews that open with `title` and are padded to the
    /// given lengths.
    pub fn reviews_mentioning(title: &str, lengths: &[usize]) -> Vec<Review> {
        lengths
            .iter()
            .enumerate()
            .map(|(i, len)| {
                let mut content = format!("{} ", title);
                let pad = len.saturating_sub(content.chars().count());
                content.push_str(&"b".repeat(pad));
                review(&format!("m{}", i), &content, Some(2.0))
            })
            .collect()
    }

    /// Create reviews that never qualify (glowing ratings).
    pub fn glowing_reviews(count: usize) -> Vec<Review> {
        (0..count)
            .map(|i| review(&format!("g{}", i), &"c".repeat(120), Some(9.0)))
            .collect()
    }

    /// The genres used across tests.
    pub fn genres() -> Vec<Genre> {
        [
            (28, "Action"),
            (12, "Adventure"),
            (16, "Animation"),
            (18, "Drama"),
            (27, "Horror"),
        ]
        .into_iter()
        .map(|(id, name)| Genre {
            id,
            name: name.to_string(),
        })
        .collect()
    }
}
