//! Round identity carried between requests in a client-held token.
//!
//! The server keeps no round state. Everything it needs to evaluate a guess
//! is the target movie id, signed into a short-lived bearer token.

mod jwt;

pub use jwt::{JwtSessionCodec, SessionConfig, DEFAULT_SESSION_SECRET};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when encoding or decoding a session token.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The token is missing, malformed, tampered with or expired.
    ///
    /// Deliberately carries no detail so nothing about the cause reaches
    /// the client.
    #[error("Invalid or expired game session")]
    Invalid,

    /// Signing failed.
    #[error("Failed to encode session: {0}")]
    Encoding(String),
}

/// The only state a round carries between requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameIdentity {
    pub movie_id: u32,
}

/// Signs and verifies round identities.
pub trait SessionCodec: Send + Sync {
    /// Encode an identity into an opaque, expiring token.
    fn encode(&self, identity: &GameIdentity) -> Result<String, SessionError>;

    /// Decode a token produced by [`SessionCodec::encode`].
    fn decode(&self, token: &str) -> Result<GameIdentity, SessionError>;
}
