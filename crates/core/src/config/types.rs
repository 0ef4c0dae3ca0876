use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::catalog::TmdbConfig;
use crate::game::GameConfig;
use crate::sanitize::TranslationConfig;
use crate::session::{SessionConfig, DEFAULT_SESSION_SECRET};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub translation: TranslationConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub game: GameConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the browser client. Not served when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub tmdb: SanitizedTmdbConfig,
    pub translation: TranslationConfig,
    pub session: SanitizedSessionConfig,
    pub game: GameConfig,
}

/// Sanitized TMDB config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTmdbConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub api_key_configured: bool,
    pub timeout_secs: u64,
}

/// Sanitized session config (secret hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedSessionConfig {
    /// False while the built-in development secret is in use.
    pub secret_configured: bool,
    pub ttl_minutes: i64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            tmdb: SanitizedTmdbConfig {
                base_url: config.tmdb.base_url.clone(),
                api_key_configured: !config.tmdb.api_key.is_empty(),
                timeout_secs: config.tmdb.timeout_secs,
            },
            translation: config.translation.clone(),
            session: SanitizedSessionConfig {
                secret_configured: !config.session.secret.is_empty()
                    && config.session.secret != DEFAULT_SESSION_SECRET,
                ttl_minutes: config.session.ttl_minutes,
            },
            game: config.game.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_config() {
        let toml = r#"
[tmdb]
api_key = "abc123"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.tmdb.api_key, "abc123");
        assert_eq!(config.tmdb.timeout_secs, 30);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert!(config.server.static_dir.is_none());
        assert_eq!(config.session.ttl_minutes, 120);
        assert_eq!(config.game.max_attempts, 20);
        assert!(config.translation.enabled);
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000
static_dir = "./public"

[tmdb]
api_key = "abc123"
base_url = "http://localhost:1234/3"
timeout_secs = 5

[translation]
enabled = false
target_language = "de"

[session]
secret = "s3cret"
ttl_minutes = 30

[game]
max_attempts = 10
batch_size = 3
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.static_dir, Some(PathBuf::from("./public")));
        assert_eq!(config.tmdb.base_url.as_deref(), Some("http://localhost:1234/3"));
        assert!(!config.translation.enabled);
        assert_eq!(config.translation.target_language, "de");
        assert_eq!(config.session.secret, "s3cret");
        assert_eq!(config.game.max_attempts, 10);
        assert_eq!(config.game.batch_size, 3);
        assert_eq!(config.game.reviews_per_round, 5);
    }

    #[test]
    fn test_sanitized_config_hides_secrets() {
        let mut config = Config::default();
        config.tmdb.api_key = "very-secret-key".to_string();
        config.session.secret = "very-secret-signing-key".to_string();

        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.tmdb.api_key_configured);
        assert!(sanitized.session.secret_configured);

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("very-secret-key"));
        assert!(!json.contains("very-secret-signing-key"));
    }

    #[test]
    fn test_sanitized_config_flags_default_secret() {
        let sanitized = SanitizedConfig::from(&Config::default());
        assert!(!sanitized.tmdb.api_key_configured);
        assert!(!sanitized.session.secret_configured);
    }
}
