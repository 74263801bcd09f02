//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod explore;
pub mod health;

use crate::config::{KrxConfig, Settings};
use crate::middleware::logging::request_logging_middleware;
use crate::services::ExplorerService;
use anyhow::Result;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub config: KrxConfig,
    pub explorer: ExplorerService,
}

/// Create application router
pub async fn create_router(settings: Settings, config: KrxConfig) -> Result<Router> {
    let explorer = ExplorerService::new(config.clone())?;

    let app_state = Arc::new(AppState {
        settings,
        config,
        explorer,
    });

    Ok(router_with_state(app_state))
}

/// Build the route table over prepared state (tests inject their own)
pub fn router_with_state(app_state: Arc<AppState>) -> Router {
    // Create middleware stack
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Create routes
    Router::new()
        .route("/api/explore/all", get(explore::explore_all))
        .route("/api/explore/category/:category", get(explore::explore_category))
        .route("/api/explore/single/:api_id", get(explore::explore_single))
        .route("/api/explore/single/:api_id/raw", get(explore::explore_single_raw))
        .route("/api/explore/categories", get(explore::list_categories))
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .layer(axum::middleware::from_fn(request_logging_middleware))
        .with_state(app_state)
        .layer(middleware_stack)
}
