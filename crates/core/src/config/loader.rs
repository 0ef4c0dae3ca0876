use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment variable prefix for overrides, e.g. `PANNED_TMDB__API_KEY`.
pub const ENV_PREFIX: &str = "PANNED_";

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    with_env(Figment::new().merge(Toml::file(path)))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Layer environment overrides on top of `figment`.
///
/// Prefixed variables win over the file. The unprefixed `TMDB_API_KEY` and
/// `GAME_SECRET` only fill keys nobody else set.
fn with_env(figment: Figment) -> Figment {
    // Field names contain single underscores, so nesting uses a double one.
    figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .join(
            Env::raw()
                .only(&["TMDB_API_KEY"])
                .map(|_| "tmdb.api_key".into()),
        )
        .join(
            Env::raw()
                .only(&["GAME_SECRET"])
                .map(|_| "session.secret".into()),
        )
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
