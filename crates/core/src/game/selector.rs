//! Puzzle selection.
//!
//! Samples random pages of the popular listing until it finds a movie with
//! enough short, strongly negative reviews, then sanitizes those reviews
//! into clues.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::join_all;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, warn};

use crate::catalog::{MovieCatalog, MovieSummary, Review};
use crate::metrics::{PUZZLES_TOTAL, PUZZLE_SELECTION_DURATION, SEARCH_ATTEMPTS};
use crate::sanitize::ReviewSanitizer;

use super::config::GameConfig;
use super::error::GameError;
use super::types::Puzzle;

/// Finds a playable movie and its sanitized reviews.
pub struct CandidateSelector {
    catalog: Arc<dyn MovieCatalog>,
    sanitizer: ReviewSanitizer,
    config: GameConfig,
    rng: Mutex<StdRng>,
}

impl CandidateSelector {
    pub fn new(
        catalog: Arc<dyn MovieCatalog>,
        sanitizer: ReviewSanitizer,
        config: GameConfig,
    ) -> Self {
        Self {
            catalog,
            sanitizer,
            config,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Replace the random source with a seeded one.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Select a puzzle.
    ///
    /// Page and review fetch failures only cost the current iteration.
    /// Returns [`GameError::NoCandidateFound`] once every attempt is spent.
    pub async fn select_puzzle(&self) -> Result<Puzzle, GameError> {
        let start = std::time::Instant::now();

        for attempt in 1..=self.config.max_attempts {
            SEARCH_ATTEMPTS.inc();
            let page = self.pick_page();

            let movies = match self.catalog.list_popular(page).await {
                Ok(movies) => movies,
                Err(e) => {
                    warn!(
                        "Attempt {}/{}: failed to list popular page {}: {}",
                        attempt, self.config.max_attempts, page, e
                    );
                    continue;
                }
            };
            debug!(
                "Attempt {}/{}: page {} has {} movies",
                attempt,
                self.config.max_attempts,
                page,
                movies.len()
            );

            let movies = self.shuffled(movies);
            for batch in movies.chunks(self.config.batch_size.max(1)) {
                let Some((movie, reviews)) = self.scan_batch(batch).await else {
                    continue;
                };

                let cleaned = self
                    .sanitizer
                    .sanitize_shortest(&reviews, &movie.title, self.config.reviews_per_round)
                    .await;

                if cleaned.len() >= self.config.reviews_per_round {
                    info!(
                        "Selected movie {} after {} attempt(s) ({} qualifying reviews)",
                        movie.id,
                        attempt,
                        reviews.len()
                    );
                    PUZZLES_TOTAL.with_label_values(&["found"]).inc();
                    PUZZLE_SELECTION_DURATION
                        .with_label_values(&["found"])
                        .observe(start.elapsed().as_secs_f64());

                    return Ok(Puzzle {
                        movie: movie.clone(),
                        reviews: cleaned
                            .into_iter()
                            .take(self.config.reviews_per_round)
                            .collect(),
                    });
                }

                debug!(
                    "Movie {} left only {} usable reviews after sanitizing",
                    movie.id,
                    cleaned.len()
                );
            }
        }

        warn!(
            "No candidate found after {} attempts",
            self.config.max_attempts
        );
        PUZZLES_TOTAL.with_label_values(&["not_found"]).inc();
        PUZZLE_SELECTION_DURATION
            .with_label_values(&["not_found"])
            .observe(start.elapsed().as_secs_f64());

        Err(GameError::NoCandidateFound)
    }

    fn pick_page(&self) -> u32 {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.random_range(1..=self.config.max_page.max(1))
    }

    fn shuffled(&self, mut movies: Vec<MovieSummary>) -> Vec<MovieSummary> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        movies.shuffle(&mut *rng);
        movies
    }

    /// Fetch reviews for a batch concurrently and pick its first candidate.
    async fn scan_batch<'a>(
        &self,
        batch: &'a [MovieSummary],
    ) -> Option<(&'a MovieSummary, Vec<Review>)> {
        let deadline = Instant::now() + Duration::from_secs(self.config.batch_timeout_secs);

        let fetches = batch.iter().map(|movie| async move {
            let reviews = match timeout_at(deadline, self.catalog.get_reviews(movie.id)).await {
                Ok(Ok(reviews)) => reviews,
                Ok(Err(e)) => {
                    warn!("Failed to fetch reviews for movie {}: {}", movie.id, e);
                    Vec::new()
                }
                Err(_) => {
                    warn!("Timed out fetching reviews for movie {}", movie.id);
                    Vec::new()
                }
            };
            (movie, reviews)
        });

        pick_candidate(join_all(fetches).await, &self.config)
    }
}

/// First movie, in batch order, with enough qualifying reviews.
///
/// Returns the movie together with its qualifying reviews only.
pub fn pick_candidate<'a>(
    fetched: Vec<(&'a MovieSummary, Vec<Review>)>,
    config: &GameConfig,
) -> Option<(&'a MovieSummary, Vec<Review>)> {
    fetched.into_iter().find_map(|(movie, reviews)| {
        let qualifying: Vec<Review> = reviews
            .into_iter()
            .filter(|r| r.is_qualifying(config.min_review_length, config.max_review_rating))
            .collect();

        (qualifying.len() >= config.reviews_per_round).then_some((movie, qualifying))
    })
}
