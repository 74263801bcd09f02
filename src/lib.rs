//! KRX API Explorer Library
//!
//! Exploratory client for the KRX market-data HTTP API: paced batch calls
//! over a configured endpoint catalog, JSON structure analysis of the
//! responses, and pretty-printed copies persisted to disk

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::{EndpointDef, KrxConfig, Settings};
pub use handlers::{create_router, router_with_state, AppState};
pub use models::{ApiResponse, CategoryReport, ExplorationReport, SingleExploration};
pub use services::{ExplorerService, KrxClient, PacingConfig, ResponseStore};
pub use utils::error::{AppError, AppResult};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
