//! Exploration handlers
//!
//! REST surface over the batched explorer: whole-catalog, per-category and
//! single-endpoint exploration, plus the catalog listing

use crate::config::EndpointDef;
use crate::handlers::AppState;
use crate::models::{CategoryReport, ExplorationReport, SingleExploration};
use crate::utils::error::AppResult;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Optional business date accepted by the single-endpoint routes
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExploreQuery {
    pub biz_date: Option<String>,
}

/// Catalog listing payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCatalog {
    pub categories: Vec<String>,
    pub total_categories: usize,
    pub apis: HashMap<String, Vec<EndpointDef>>,
}

/// Explore every configured endpoint
///
/// GET /api/explore/all
pub async fn explore_all(State(state): State<Arc<AppState>>) -> Json<ExplorationReport> {
    info!("Request received: explore all APIs");

    let report = state.explorer.explore_all(&CancellationToken::new()).await;
    Json(report)
}

/// Explore every endpoint of one category
///
/// GET /api/explore/category/:category
pub async fn explore_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> AppResult<Json<CategoryReport>> {
    info!("Request received: explore category {}", category);

    let report = state
        .explorer
        .explore_category(&category, &CancellationToken::new())
        .await?;
    Ok(Json(report))
}

/// Explore one endpoint and return the structured result
///
/// GET /api/explore/single/:api_id?bizDate=YYYYMMDD
pub async fn explore_single(
    State(state): State<Arc<AppState>>,
    Path(api_id): Path<String>,
    Query(query): Query<ExploreQuery>,
) -> Json<SingleExploration> {
    info!(
        "Request received: explore single API {} with date {:?}",
        api_id, query.biz_date
    );

    let response = state
        .explorer
        .explore_single(&api_id, query.biz_date.as_deref())
        .await;
    Json(SingleExploration::from(response))
}

/// Explore one endpoint and return the raw body as plain text
///
/// GET /api/explore/single/:api_id/raw?bizDate=YYYYMMDD
pub async fn explore_single_raw(
    State(state): State<Arc<AppState>>,
    Path(api_id): Path<String>,
    Query(query): Query<ExploreQuery>,
) -> String {
    info!(
        "Request received: explore single API {} raw response with date {:?}",
        api_id, query.biz_date
    );

    let response = state
        .explorer
        .explore_single(&api_id, query.biz_date.as_deref())
        .await;

    match response.raw_response {
        Some(body) => body,
        None => format!(
            "ERROR: {}",
            response.error_message.unwrap_or_default()
        ),
    }
}

/// List the configured categories and their endpoint definitions
///
/// GET /api/explore/categories
pub async fn list_categories(State(state): State<Arc<AppState>>) -> Json<CategoryCatalog> {
    info!("Request received: get available categories");

    Json(CategoryCatalog {
        categories: state.config.category_names(),
        total_categories: state.config.apis.len(),
        apis: state.config.apis.clone(),
    })
}
