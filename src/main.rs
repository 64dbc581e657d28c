// anh2prompt - Image-to-prompt analysis gateway for the Gemini vision API

use anh2prompt::cli::{analyze, Args};
use anh2prompt::config::AppConfig;
use anh2prompt::gemini::GeminiClient;
use anh2prompt::server::create_router;
use anh2prompt::utils::logging;
use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration (.env first, matching the hosted setup)
    let _ = dotenvy::dotenv();
    let config = AppConfig::load()?;

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting anh2prompt v{}", env!("CARGO_PKG_VERSION"));

    // Phase 2.5: Client mode (--analyze): prepare and upload, then exit
    if let Some(path) = args.analyze.as_deref() {
        let gateway_url = args.gateway.clone().unwrap_or_else(|| {
            format!(
                "http://{}:{}/api/generate",
                config.server.host, config.server.port
            )
        });
        return analyze::run(path, &gateway_url).await;
    }

    // Phase 3: Build the upstream client
    if config.gemini.api_key.is_empty() {
        warn!("GOOGLE_AI_API_KEY is not set; analysis requests will be rejected");
    }
    let gemini_client = GeminiClient::new(&config.gemini)?;

    // Phase 4: Build and start HTTP server
    let app = create_router(config.clone(), gemini_client)?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 5: Run server with graceful shutdown
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
