//! The guessing game.
//!
//! A round is a movie picked by the [`CandidateSelector`], delivered as a
//! handful of sanitized reviews plus a signed token. Guesses are judged by
//! the [`GuessEvaluator`]. [`GameService`] wires both to the session codec.

mod config;
mod error;
mod evaluator;
mod selector;
mod service;
mod types;

pub use config::GameConfig;
pub use error::GameError;
pub use evaluator::{compare, GuessEvaluator, Verdict, UNKNOWN_GENRE};
pub use selector::{pick_candidate, CandidateSelector};
pub use service::GameService;
pub use types::{GenreMatch, GuessFeedback, GuessOutcome, Puzzle, RoundStart, YearDiff};
