//! Round lifecycle: start a round, judge guesses, search titles.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::catalog::{CatalogError, CatalogReferenceCache, MovieCatalog, MovieSummary};
use crate::metrics::GUESSES_TOTAL;
use crate::sanitize::{ReviewSanitizer, Translator};
use crate::session::{GameIdentity, SessionCodec};

use super::config::GameConfig;
use super::error::GameError;
use super::evaluator::{GuessEvaluator, Verdict};
use super::selector::CandidateSelector;
use super::types::{GuessOutcome, RoundStart};

/// Everything a round needs, wired together.
pub struct GameService {
    catalog: Arc<dyn MovieCatalog>,
    selector: CandidateSelector,
    evaluator: GuessEvaluator,
    codec: Arc<dyn SessionCodec>,
    max_guesses: u32,
}

impl GameService {
    pub fn new(
        catalog: Arc<dyn MovieCatalog>,
        translator: Arc<dyn Translator>,
        codec: Arc<dyn SessionCodec>,
        config: &GameConfig,
        target_language: &str,
    ) -> Self {
        let sanitizer = ReviewSanitizer::new(translator, target_language, config.max_review_chars);
        let reference = Arc::new(CatalogReferenceCache::new(
            Arc::clone(&catalog),
            Duration::from_secs(config.genre_cache_ttl_secs),
        ));

        Self {
            selector: CandidateSelector::new(Arc::clone(&catalog), sanitizer, config.clone()),
            evaluator: GuessEvaluator::new(reference),
            catalog,
            codec,
            max_guesses: config.max_guesses,
        }
    }

    /// Use a seeded random source for puzzle selection.
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            selector: self.selector.with_seed(seed),
            ..self
        }
    }

    /// Select a puzzle and sign its identity.
    pub async fn start_round(&self) -> Result<RoundStart, GameError> {
        let puzzle = self.selector.select_puzzle().await?;

        let token = self
            .codec
            .encode(&GameIdentity {
                movie_id: puzzle.movie.id,
            })
            .map_err(|e| {
                error!("Failed to sign round: {}", e);
                GameError::Internal(e.to_string())
            })?;

        info!("Round started ({} reviews)", puzzle.reviews.len());

        Ok(RoundStart {
            token,
            reviews: puzzle.reviews,
            max_guesses: self.max_guesses,
        })
    }

    /// Judge a guess against the round's target.
    ///
    /// A correct guess always reveals the target. A wrong guess reveals it
    /// only when the caller marks the attempt as final.
    pub async fn submit_guess(
        &self,
        token: &str,
        guess_movie_id: u32,
        reveal_if_wrong: bool,
    ) -> Result<GuessOutcome, GameError> {
        let identity = self.codec.decode(token).map_err(|_| {
            GUESSES_TOTAL.with_label_values(&["rejected"]).inc();
            GameError::InvalidSession
        })?;

        let target = self
            .catalog
            .get_movie(identity.movie_id)
            .await
            .map_err(|e| {
                warn!("Failed to load target movie {}: {}", identity.movie_id, e);
                GameError::UpstreamUnavailable(e.to_string())
            })?;

        if guess_movie_id == target.id {
            return Ok(self.won(target));
        }

        let guess = self
            .catalog
            .get_movie(guess_movie_id)
            .await
            .map_err(|e| match e {
                CatalogError::NotFound(_) => {
                    GUESSES_TOTAL.with_label_values(&["rejected"]).inc();
                    GameError::UnknownGuess(guess_movie_id)
                }
                other => {
                    warn!("Failed to load guessed movie {}: {}", guess_movie_id, other);
                    GameError::UpstreamUnavailable(other.to_string())
                }
            })?;

        match self.evaluator.evaluate(&target, &guess).await {
            Verdict::Win => Ok(self.won(target)),
            Verdict::Miss(feedback) => {
                debug!(
                    "Wrong guess {} (final: {})",
                    guess_movie_id, reveal_if_wrong
                );
                GUESSES_TOTAL.with_label_values(&["wrong"]).inc();

                Ok(GuessOutcome {
                    correct: false,
                    won: false,
                    done: reveal_if_wrong,
                    feedback: Some(feedback),
                    target_movie: reveal_if_wrong.then_some(target),
                })
            }
        }
    }

    fn won(&self, target: MovieSummary) -> GuessOutcome {
        GUESSES_TOTAL.with_label_values(&["correct"]).inc();

        GuessOutcome {
            correct: true,
            won: true,
            done: true,
            feedback: None,
            target_movie: Some(target),
        }
    }

    /// Title search for the guess box. Failures yield no results.
    pub async fn search(&self, query: &str) -> Vec<MovieSummary> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        match self.catalog.search_movies(query).await {
            Ok(results) => results,
            Err(e) => {
                warn!("Search for '{}' failed: {}", query, e);
                Vec::new()
            }
        }
    }

    /// Guesses allowed per round.
    pub fn max_guesses(&self) -> u32 {
        self.max_guesses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitize::TITLE_MARKER;
    use crate::session::{JwtSessionCodec, SessionError};
    use crate::testing::{fixtures, MockMovieCatalog, MockTranslator, RecordedCatalogQuery};

    struct Fixture {
        catalog: Arc<MockMovieCatalog>,
        service: GameService,
    }

    async fn fixture() -> Fixture {
        let catalog = Arc::new(MockMovieCatalog::new());
        catalog.set_genres(fixtures::genres()).await;
        catalog
            .set_popular_fallback(vec![fixtures::movie(42, "Nightfall", "2003-10-31", &[27, 18])])
            .await;
        catalog
            .set_reviews(42, fixtures::reviews_mentioning("Nightfall", &[60, 80, 95, 110, 130]))
            .await;
        catalog
            .add_movie(fixtures::movie(7, "Daybreak", "1999-05-01", &[18, 12]))
            .await;

        let codec = Arc::new(JwtSessionCodec::new("test", chrono::Duration::hours(2)));
        let config = GameConfig {
            max_attempts: 2,
            batch_timeout_secs: 1,
            ..GameConfig::default()
        };
        let service = GameService::new(
            catalog.clone(),
            Arc::new(MockTranslator::new()),
            codec,
            &config,
            "fr",
        )
        .with_seed(1);

        Fixture { catalog, service }
    }

    #[tokio::test]
    async fn test_start_round() {
        let f = fixture().await;

        let round = f.service.start_round().await.unwrap();

        assert_eq!(round.reviews.len(), 5);
        assert_eq!(round.max_guesses, 5);
        assert!(round.reviews.iter().all(|r| r.starts_with(TITLE_MARKER)));
        assert!(!round.token.is_empty());
    }

    #[tokio::test]
    async fn test_correct_guess_reveals_target() {
        let f = fixture().await;
        let round = f.service.start_round().await.unwrap();

        let outcome = f.service.submit_guess(&round.token, 42, false).await.unwrap();

        assert!(outcome.correct && outcome.won && outcome.done);
        assert!(outcome.feedback.is_none());
        assert_eq!(outcome.target_movie.unwrap().title, "Nightfall");
    }

    #[tokio::test]
    async fn test_wrong_guess_hides_target_unless_final() {
        let f = fixture().await;
        let round = f.service.start_round().await.unwrap();

        let outcome = f.service.submit_guess(&round.token, 7, false).await.unwrap();
        assert!(!outcome.correct && !outcome.done);
        assert!(outcome.target_movie.is_none());

        let feedback = outcome.feedback.unwrap();
        assert_eq!(feedback.movie_title, "Daybreak");
        assert_eq!(feedback.year, Some(1999));
        assert_eq!(feedback.year_diff, crate::game::YearDiff::Newer);
        assert_eq!(feedback.genres[0].name, "Drama");
        assert!(feedback.genres[0].matched);
        assert!(!feedback.genres[1].matched);

        let last = f.service.submit_guess(&round.token, 7, true).await.unwrap();
        assert!(last.done && !last.won);
        assert_eq!(last.target_movie.unwrap().id, 42);
    }

    #[tokio::test]
    async fn test_invalid_token_rejected() {
        let f = fixture().await;

        let result = f.service.submit_guess("garbage", 42, false).await;
        assert!(matches!(result, Err(GameError::InvalidSession)));
        // Nothing is looked up for a bad token.
        assert!(f.catalog.recorded_queries().await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_guess() {
        let f = fixture().await;
        let round = f.service.start_round().await.unwrap();

        let result = f.service.submit_guess(&round.token, 999, false).await;
        assert!(matches!(result, Err(GameError::UnknownGuess(999))));
    }

    #[tokio::test]
    async fn test_target_lookup_failure_is_upstream() {
        let f = fixture().await;
        let round = f.service.start_round().await.unwrap();
        f.catalog.set_next_error(CatalogError::RateLimitExceeded).await;

        let result = f.service.submit_guess(&round.token, 7, false).await;
        assert!(matches!(result, Err(GameError::UpstreamUnavailable(_))));
    }

    #[tokio::test]
    async fn test_start_round_not_found() {
        let f = fixture().await;
        f.catalog.set_popular_unavailable(true).await;

        let result = f.service.start_round().await;
        assert!(matches!(result, Err(GameError::NoCandidateFound)));
    }

    #[tokio::test]
    async fn test_search_skips_empty_query() {
        let f = fixture().await;

        assert!(f.service.search("   ").await.is_empty());
        assert!(f.catalog.recorded_queries().await.is_empty());
    }

    #[tokio::test]
    async fn test_search_swallows_failures() {
        let f = fixture().await;

        let results = f.service.search("day").await;
        assert_eq!(results.len(), 1);
        assert_eq!(
            f.catalog.recorded_queries().await,
            vec![RecordedCatalogQuery::SearchMovies {
                query: "day".to_string()
            }]
        );

        f.catalog.set_next_error(CatalogError::RateLimitExceeded).await;
        assert!(f.service.search("day").await.is_empty());
    }

    struct FailingCodec;

    impl SessionCodec for FailingCodec {
        fn encode(&self, _: &GameIdentity) -> Result<String, SessionError> {
            Err(SessionError::Encoding("no key".to_string()))
        }

        fn decode(&self, _: &str) -> Result<GameIdentity, SessionError> {
            Err(SessionError::Invalid)
        }
    }

    #[tokio::test]
    async fn test_signing_failure_is_internal_error() {
        let f = fixture().await;
        let service = GameService::new(
            f.catalog.clone(),
            Arc::new(MockTranslator::new()),
            Arc::new(FailingCodec),
            &GameConfig::default(),
            "fr",
        );

        assert!(matches!(
            service.start_round().await,
            Err(GameError::Internal(_))
        ));
    }
}
