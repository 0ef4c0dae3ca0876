//! Game configuration.

use serde::{Deserialize, Serialize};

/// Tuning for puzzle selection and round rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Popular pages sampled before giving up on a round.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Highest popular page to sample from (pages start at 1).
    #[serde(default = "default_max_page")]
    pub max_page: u32,

    /// Movies whose reviews are fetched concurrently.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Reviews delivered per round. Also the qualifying-review threshold
    /// a movie must reach to be picked.
    #[serde(default = "default_reviews_per_round")]
    pub reviews_per_round: usize,

    /// A qualifying review is strictly longer than this (characters).
    #[serde(default = "default_min_review_length")]
    pub min_review_length: usize,

    /// A qualifying review is rated at most this.
    #[serde(default = "default_max_review_rating")]
    pub max_review_rating: f32,

    /// Wall-clock limit for one batch of review fetches (seconds).
    /// Movies still pending at the deadline count as having no reviews.
    #[serde(default = "default_batch_timeout")]
    pub batch_timeout_secs: u64,

    /// Delivered reviews are cut to this many characters.
    #[serde(default = "default_max_review_chars")]
    pub max_review_chars: usize,

    /// How long the genre table is trusted before refetching (seconds).
    #[serde(default = "default_genre_cache_ttl")]
    pub genre_cache_ttl_secs: u64,

    /// Guesses a player gets per round.
    #[serde(default = "default_max_guesses")]
    pub max_guesses: u32,
}

fn default_max_attempts() -> u32 {
    20
}

fn default_max_page() -> u32 {
    100
}

fn default_batch_size() -> usize {
    5
}

fn default_reviews_per_round() -> usize {
    5
}

fn default_min_review_length() -> usize {
    50
}

fn default_max_review_rating() -> f32 {
    3.0
}

fn default_batch_timeout() -> u64 {
    10
}

fn default_max_review_chars() -> usize {
    600
}

fn default_genre_cache_ttl() -> u64 {
    86400 // 24 hours
}

fn default_max_guesses() -> u32 {
    5
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            max_page: default_max_page(),
            batch_size: default_batch_size(),
            reviews_per_round: default_reviews_per_round(),
            min_review_length: default_min_review_length(),
            max_review_rating: default_max_review_rating(),
            batch_timeout_secs: default_batch_timeout(),
            max_review_chars: default_max_review_chars(),
            genre_cache_ttl_secs: default_genre_cache_ttl(),
            max_guesses: default_max_guesses(),
        }
    }
}
