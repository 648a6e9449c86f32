// sdapi-venice - Stable Diffusion WebUI API compatible proxy for Venice
// Author: kelexine (https://github.com/kelexine)

use anyhow::{Context, Result};
use clap::Parser;
use sdapi_venice::cli::Args;
use sdapi_venice::config::AppConfig;
use sdapi_venice::models::GenerationSettings;
use sdapi_venice::server::create_router;
use sdapi_venice::settings::SettingsStore;
use sdapi_venice::utils::logging;
use sdapi_venice::venice::VeniceClient;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load .env so the API key can live next to the binary
    let env_file = match &args.env_file {
        Some(path) => Some(
            dotenv::from_path(path)
                .map(|_| path.clone())
                .with_context(|| format!("failed to load env file {}", path.display()))?,
        ),
        None => dotenv::dotenv().ok(),
    };

    // Phase 2: Load configuration
    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply(&mut config);

    // Phase 3: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting sdapi-venice v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = env_file {
        debug!("Loaded environment from {}", path.display());
    }
    debug!("Gateway settings: {:?}", config.gateway);

    // Phase 4: Venice client
    let api_key = config.resolve_api_key()?;
    let venice_client = VeniceClient::new(&config.venice, api_key)?;
    info!("Forwarding to Venice at {}", venice_client.base_url());

    // Phase 5: Build and start HTTP server
    let settings = SettingsStore::new(GenerationSettings::new(config.venice.default_model.clone()));
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = create_router(config, venice_client, settings)?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 6: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
