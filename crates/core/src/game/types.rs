//! Types exchanged with game clients.

use serde::{Deserialize, Serialize};

use crate::catalog::MovieSummary;

/// A selected movie and the sanitized reviews that hint at it.
#[derive(Debug, Clone)]
pub struct Puzzle {
    pub movie: MovieSummary,
    /// Sanitized reviews, shortest first.
    pub reviews: Vec<String>,
}

/// Where the target's release year sits relative to the guess.
///
/// `Newer` means the target came out after the guessed movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YearDiff {
    Older,
    Newer,
    Same,
}

impl YearDiff {
    /// Compare the guess year against the target year.
    ///
    /// A missing year on either side compares as `Same`.
    pub fn between(target_year: Option<i32>, guess_year: Option<i32>) -> Self {
        match (target_year, guess_year) {
            (Some(target), Some(guess)) if guess < target => YearDiff::Newer,
            (Some(target), Some(guess)) if guess > target => YearDiff::Older,
            _ => YearDiff::Same,
        }
    }
}

/// One genre of the guessed movie and whether the target shares it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreMatch {
    pub name: String,
    #[serde(rename = "match")]
    pub matched: bool,
}

/// Hints returned for a wrong guess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessFeedback {
    /// Title of the guessed movie.
    pub movie_title: String,
    /// Release year of the guessed movie.
    pub year: Option<i32>,
    pub year_diff: YearDiff,
    /// Genres of the guessed movie, in its catalog order.
    pub genres: Vec<GenreMatch>,
}

/// A freshly started round.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundStart {
    /// Signed round identity, echoed back with every guess.
    pub token: String,
    pub reviews: Vec<String>,
    pub max_guesses: u32,
}

/// Result of one guess.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessOutcome {
    pub correct: bool,
    pub won: bool,
    /// Whether the round is over.
    pub done: bool,
    /// Hints about the guess. Absent on a correct guess.
    pub feedback: Option<GuessFeedback>,
    /// The answer, when revealed.
    pub target_movie: Option<MovieSummary>,
}
