use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use panned_core::{
    load_config, validate_config, GameService, GoogleTranslator, JwtSessionCodec, MovieCatalog,
    PassthroughTranslator, SessionCodec, TmdbClient, Translator,
};
use panned_server::api::create_router;
use panned_server::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("PANNED_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    // Config hash identifies the running configuration in logs
    let config_json = serde_json::to_string(&config).unwrap_or_default();
    let config_hash = format!("{:x}", Sha256::digest(config_json.as_bytes()));
    info!(
        "Panned {} configured (config hash {})",
        VERSION,
        &config_hash[..16]
    );

    // Movie catalog
    let catalog: Arc<dyn MovieCatalog> = Arc::new(
        TmdbClient::new(config.tmdb.clone()).context("Failed to create TMDB client")?,
    );
    info!("TMDB client initialized");

    // Review translation
    let translator: Arc<dyn Translator> = if config.translation.enabled {
        match GoogleTranslator::new(&config.translation) {
            Ok(translator) => Arc::new(translator),
            Err(e) => {
                warn!("Failed to create translator, reviews stay untranslated: {}", e);
                Arc::new(PassthroughTranslator)
            }
        }
    } else {
        Arc::new(PassthroughTranslator)
    };
    info!(
        "Translating reviews via {} (target: {})",
        translator.name(),
        config.translation.target_language
    );

    // Round tokens
    let codec: Arc<dyn SessionCodec> = Arc::new(JwtSessionCodec::from_config(&config.session));

    let game = Arc::new(GameService::new(
        catalog,
        translator,
        codec,
        &config.game,
        &config.translation.target_language,
    ));

    if let Some(dir) = &config.server.static_dir {
        info!("Serving client from {:?}", dir);
    }

    // Create app state
    let addr = SocketAddr::new(config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config, game));

    // Create router
    let app = create_router(state);

    // Start server
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
