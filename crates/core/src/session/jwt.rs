use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{GameIdentity, SessionCodec, SessionError};

/// Secret used when none is configured. Fine for local play only.
pub const DEFAULT_SESSION_SECRET: &str = "panned-dev-secret";

/// Session token configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// HMAC secret for signing tokens.
    #[serde(default = "default_secret")]
    pub secret: String,
    /// Token lifetime in minutes (default: 120).
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: i64,
}

fn default_secret() -> String {
    DEFAULT_SESSION_SECRET.to_string()
}

fn default_ttl_minutes() -> i64 {
    120
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            ttl_minutes: default_ttl_minutes(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(rename = "movieId")]
    movie_id: u32,
    iat: i64, // Issued at
    exp: i64, // Absolute expiry
}

/// HS256 token codec.
pub struct JwtSessionCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for JwtSessionCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionCodec")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl JwtSessionCodec {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is absolute.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(&config.secret, Duration::minutes(config.ttl_minutes))
    }

    /// Encode an identity as if issued at `issued_at`.
    pub fn encode_at(
        &self,
        identity: &GameIdentity,
        issued_at: DateTime<Utc>,
    ) -> Result<String, SessionError> {
        let claims = Claims {
            movie_id: identity.movie_id,
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| SessionError::Encoding(e.to_string()))
    }
}

impl SessionCodec for JwtSessionCodec {
    fn encode(&self, identity: &GameIdentity) -> Result<String, SessionError> {
        self.encode_at(identity, Utc::now())
    }

    fn decode(&self, token: &str) -> Result<GameIdentity, SessionError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            debug!("Rejected session token: {}", e);
            SessionError::Invalid
        })?;

        Ok(GameIdentity {
            movie_id: data.claims.movie_id,
        })
    }
}
