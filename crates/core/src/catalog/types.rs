//! Types for movie catalog data.

use serde::{Deserialize, Serialize};

/// A movie as the game sees it.
///
/// Search results, popular listings and detail lookups all normalize into
/// this shape, so genre information is always a list of ids in the order the
/// catalog reported them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    /// Catalog movie ID.
    pub id: u32,
    /// Movie title.
    pub title: String,
    /// Release date (YYYY-MM-DD). May be empty for unreleased titles.
    #[serde(default)]
    pub release_date: String,
    /// Genre ids, in catalog order.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Poster path (relative to the catalog image base URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    /// Movie overview/synopsis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
}

impl MovieSummary {
    /// Get the release year from the release date.
    pub fn year(&self) -> Option<i32> {
        self.release_date
            .split('-')
            .next()
            .filter(|y| !y.is_empty())
            .and_then(|y| y.parse().ok())
    }
}

/// A catalog genre.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// A user review of a movie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    /// Catalog review ID.
    pub id: String,
    /// Review author.
    pub author: String,
    /// Free-text review body.
    pub content: String,
    /// Creation timestamp as reported by the catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Author rating, on whatever scale the catalog reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

impl Review {
    /// Length of the review body in characters.
    pub fn content_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Whether this review is long enough and negative enough to be shown
    /// as a puzzle clue.
    ///
    /// A missing rating never qualifies.
    pub fn is_qualifying(&self, min_length: usize, max_rating: f32) -> bool {
        self.content_len() > min_length && self.rating.is_some_and(|r| r <= max_rating)
    }
}
