use thiserror::Error;

/// Errors surfaced to callers of the game service.
#[derive(Debug, Error)]
pub enum GameError {
    /// The catalog could not be reached or answered with an error.
    #[error("Upstream service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Every selection attempt came up empty. Retrying may succeed.
    #[error("No suitable movie found, please try again")]
    NoCandidateFound,

    /// The session token is missing, malformed or expired.
    #[error("Invalid or expired game session")]
    InvalidSession,

    /// The guessed movie id does not resolve in the catalog.
    #[error("Unknown movie: {0}")]
    UnknownGuess(u32),

    /// A local fault, such as a round that could not be signed.
    #[error("Internal error: {0}")]
    Internal(String),
}
