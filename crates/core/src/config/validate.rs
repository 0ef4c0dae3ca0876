use tracing::warn;

use crate::sanitize::WORD_MARKER;
use crate::session::DEFAULT_SESSION_SECRET;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - TMDB API key and session secret are set
/// - Game tuning values are usable
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(invalid("server.port cannot be 0"));
    }

    if config.tmdb.api_key.trim().is_empty() {
        return Err(invalid(
            "tmdb.api_key is required (or set TMDB_API_KEY)",
        ));
    }

    if config.session.secret.is_empty() {
        return Err(invalid("session.secret cannot be empty"));
    }
    if config.session.ttl_minutes <= 0 {
        return Err(invalid("session.ttl_minutes must be positive"));
    }
    if config.session.secret == DEFAULT_SESSION_SECRET {
        warn!("Using the built-in session secret; set session.secret or GAME_SECRET in production");
    }

    let game = &config.game;
    for (name, value) in [
        ("game.max_attempts", game.max_attempts as usize),
        ("game.max_page", game.max_page as usize),
        ("game.batch_size", game.batch_size),
        ("game.reviews_per_round", game.reviews_per_round),
        ("game.max_guesses", game.max_guesses as usize),
    ] {
        if value == 0 {
            return Err(invalid(&format!("{} cannot be 0", name)));
        }
    }

    if game.max_review_chars <= WORD_MARKER.len() {
        return Err(invalid(&format!(
            "game.max_review_chars must be greater than {}",
            WORD_MARKER.len()
        )));
    }

    if config.translation.enabled && config.translation.target_language.trim().is_empty() {
        return Err(invalid(
            "translation.target_language is required when translation is enabled",
        ));
    }

    Ok(())
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::ValidationError(message.to_string())
}
