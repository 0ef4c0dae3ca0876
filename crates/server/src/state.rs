use std::path::Path;
use std::sync::Arc;

use panned_core::{Config, GameService, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    game: Arc<GameService>,
}

impl AppState {
    pub fn new(config: Config, game: Arc<GameService>) -> Self {
        Self { config, game }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn game(&self) -> &GameService {
        self.game.as_ref()
    }

    /// Directory the browser client is served from, if any.
    pub fn static_dir(&self) -> Option<&Path> {
        self.config.server.static_dir.as_deref()
    }
}
