//! Guess evaluation.

use std::collections::HashSet;
use std::sync::Arc;

use crate::catalog::{CatalogReferenceCache, GenreTable, MovieSummary};

use super::types::{GenreMatch, GuessFeedback, YearDiff};

/// Name shown for genre ids missing from the reference table.
pub const UNKNOWN_GENRE: &str = "Unknown";

/// Outcome of comparing a guess with the target.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Win,
    Miss(GuessFeedback),
}

/// Compares guesses against the round's target movie.
pub struct GuessEvaluator {
    reference: Arc<CatalogReferenceCache>,
}

impl GuessEvaluator {
    pub fn new(reference: Arc<CatalogReferenceCache>) -> Self {
        Self { reference }
    }

    /// Evaluate a guess. Genre names come from the reference cache, which is
    /// only consulted on a miss.
    pub async fn evaluate(&self, target: &MovieSummary, guess: &MovieSummary) -> Verdict {
        if target.id == guess.id {
            return Verdict::Win;
        }

        let genres = self.reference.genres().await;
        compare(target, guess, &genres)
    }
}

/// Compare a guess with the target using a resolved genre table.
pub fn compare(target: &MovieSummary, guess: &MovieSummary, genres: &GenreTable) -> Verdict {
    if target.id == guess.id {
        return Verdict::Win;
    }

    let target_genres: HashSet<u32> = target.genre_ids.iter().copied().collect();
    let genres = guess
        .genre_ids
        .iter()
        .map(|id| GenreMatch {
            name: genres
                .get(id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_GENRE.to_string()),
            matched: target_genres.contains(id),
        })
        .collect();

    Verdict::Miss(GuessFeedback {
        movie_title: guess.title.clone(),
        year: guess.year(),
        year_diff: YearDiff::between(target.year(), guess.year()),
        genres,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, MockMovieCatalog, RecordedCatalogQuery};
    use std::time::Duration;

    fn table() -> GenreTable {
        fixtures::genres().into_iter().map(|g| (g.id, g.name)).collect()
    }

    fn miss(verdict: Verdict) -> GuessFeedback {
        match verdict {
            Verdict::Miss(feedback) => feedback,
            Verdict::Win => panic!("expected a miss"),
        }
    }

    #[test]
    fn test_same_id_wins_regardless_of_fields() {
        let target = fixtures::movie(10, "Nightfall", "2003-10-31", &[27]);
        let guess = fixtures::movie(10, "Something Else", "1950-01-01", &[16]);

        assert_eq!(compare(&target, &guess, &table()), Verdict::Win);
    }

    #[test]
    fn test_year_diff_labels() {
        let target = fixtures::movie(1, "Target", "1999-03-31", &[]);

        let later = fixtures::movie(2, "Later", "2005-06-01", &[]);
        let earlier = fixtures::movie(3, "Earlier", "1990-06-01", &[]);
        let same = fixtures::movie(4, "Same", "1999-12-01", &[]);

        assert_eq!(miss(compare(&target, &later, &table())).year_diff, YearDiff::Older);
        assert_eq!(miss(compare(&target, &earlier, &table())).year_diff, YearDiff::Newer);
        assert_eq!(miss(compare(&target, &same, &table())).year_diff, YearDiff::Same);
    }

    #[test]
    fn test_genres_follow_guess_order() {
        let target = fixtures::movie(1, "Target", "1999-01-01", &[28, 12]);
        let guess = fixtures::movie(2, "Guess", "1999-01-01", &[12, 16]);

        let feedback = miss(compare(&target, &guess, &table()));

        assert_eq!(
            feedback.genres,
            vec![
                GenreMatch {
                    name: "Adventure".to_string(),
                    matched: true
                },
                GenreMatch {
                    name: "Animation".to_string(),
                    matched: false
                },
            ]
        );
        // Target-only genres never show up.
        assert!(feedback.genres.iter().all(|g| g.name != "Action"));
    }

    #[test]
    fn test_unresolved_genre_is_unknown() {
        let target = fixtures::movie(1, "Target", "1999-01-01", &[]);
        let guess = fixtures::movie(2, "Guess", "1999-01-01", &[9999]);

        let feedback = miss(compare(&target, &guess, &GenreTable::new()));
        assert_eq!(feedback.genres[0].name, UNKNOWN_GENRE);
        assert!(!feedback.genres[0].matched);
    }

    #[test]
    fn test_missing_year_is_null_and_same() {
        let target = fixtures::movie(1, "Target", "1999-01-01", &[]);
        let guess = fixtures::movie(2, "Unreleased", "", &[]);

        let feedback = miss(compare(&target, &guess, &table()));
        assert_eq!(feedback.year, None);
        assert_eq!(feedback.year_diff, YearDiff::Same);
        assert_eq!(feedback.movie_title, "Unreleased");
    }

    #[tokio::test]
    async fn test_win_skips_genre_lookup() {
        let catalog = Arc::new(MockMovieCatalog::new());
        let reference = Arc::new(CatalogReferenceCache::new(
            catalog.clone(),
            Duration::from_secs(60),
        ));
        let evaluator = GuessEvaluator::new(reference);
        let movie = fixtures::movie(1, "Nightfall", "2003-10-31", &[27]);

        assert_eq!(evaluator.evaluate(&movie, &movie).await, Verdict::Win);
        assert_eq!(catalog.query_count().await, 0);
    }

    #[tokio::test]
    async fn test_miss_resolves_genres_from_cache() {
        let catalog = Arc::new(MockMovieCatalog::new());
        catalog.set_genres(fixtures::genres()).await;
        let reference = Arc::new(CatalogReferenceCache::new(
            catalog.clone(),
            Duration::from_secs(60),
        ));
        let evaluator = GuessEvaluator::new(reference);

        let target = fixtures::movie(1, "Nightfall", "2003-10-31", &[27]);
        let guess = fixtures::movie(2, "Daybreak", "2004-01-01", &[27, 18]);

        let first = miss(evaluator.evaluate(&target, &guess).await);
        let second = miss(evaluator.evaluate(&target, &guess).await);

        assert_eq!(first, second);
        assert_eq!(first.genres[0].name, "Horror");
        assert!(first.genres[0].matched);
        assert_eq!(first.genres[1].name, "Drama");
        assert_eq!(
            catalog.recorded_queries().await,
            vec![RecordedCatalogQuery::GetGenres]
        );
    }
}
