//! KRX API Explorer Server
//!
//! HTTP service for exploring the KRX market-data API: paced batch calls
//! over a configured endpoint catalog with JSON structure analysis

use anyhow::{Context, Result};
use krx_explorer::config::{KrxConfig, Settings};
use krx_explorer::handlers::create_router;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    // Load server settings from environment
    let settings = Settings::new().context("Failed to load server settings")?;
    info!("Server settings loaded");

    // Load endpoint catalog from JSON file (required)
    let config = KrxConfig::load_default().context("Failed to load KRX configuration")?;
    info!(
        "📁 Endpoint catalog loaded: {} categories, {} endpoints",
        config.apis.len(),
        config.endpoint_count()
    );

    // Create router
    let addr = settings.listen_addr();
    let app = create_router(settings, config).await?;

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🚀 KRX API Explorer started!");
    info!("📝 Health check: http://{}/health", addr);
    info!("🔍 Explore endpoint: http://{}/api/explore/all", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start server: {}", e))?;

    Ok(())
}

/// Initialize logging system
fn init_logging() {
    // Get log level from environment variable, default to info
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    // Check if JSON format should be used
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if log_format == "json" {
        // JSON format logs (production environment)
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(log_level)
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .finish(),
        )
    } else {
        // Human readable format (development environment)
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(log_level)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        )
    };

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Logging system initialized");
}
