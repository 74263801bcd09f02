//! Batched exploration service
//!
//! Walks the endpoint catalog one call at a time with a fixed gap between
//! calls, folds every per-call outcome into an aggregate report, and
//! persists successful bodies exactly once, at the point of receipt.

use crate::config::{EndpointDef, KrxConfig};
use crate::models::{
    ApiResponse, CategoryReport, EndpointResult, ExplorationReport, ExplorationSummary,
};
use crate::services::client::KrxClient;
use crate::services::storage::ResponseStore;
use crate::utils::error::{AppError, AppResult};
use anyhow::Result;
use std::collections::HashMap;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Gap enforced between sequential calls of one batch
///
/// Simple pacing to keep the load on the upstream API gentle, not a rate
/// limiter. Category batches are smaller and may run slightly tighter.
#[derive(Debug, Clone, Copy)]
pub struct PacingConfig {
    pub all_delay: Duration,
    pub category_delay: Duration,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            all_delay: Duration::from_millis(500),
            category_delay: Duration::from_millis(300),
        }
    }
}

/// Exploration orchestrator over the configured endpoint catalog
#[derive(Debug, Clone)]
pub struct ExplorerService {
    client: KrxClient,
    config: KrxConfig,
    store: ResponseStore,
    pacing: PacingConfig,
}

impl ExplorerService {
    /// Create a service over the given catalog
    pub fn new(config: KrxConfig) -> Result<Self> {
        let client = KrxClient::new(config.api.clone())?;

        Ok(Self {
            client,
            config,
            store: ResponseStore::default(),
            pacing: PacingConfig::default(),
        })
    }

    /// Replace the response store (tests use a temp directory)
    pub fn with_store(mut self, store: ResponseStore) -> Self {
        self.store = store;
        self
    }

    /// Replace the pacing configuration
    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    /// Explore every configured endpoint
    pub async fn explore_all(&self, cancel: &CancellationToken) -> ExplorationReport {
        info!("Starting exploration of all KRX APIs");

        let endpoints = self.config.all_endpoints();
        let results = self
            .run_batch(&endpoints, self.pacing.all_delay, cancel)
            .await;
        let summary = ExplorationSummary::from_results(&results);

        info!("All APIs exploration completed. Total: {}", endpoints.len());
        ExplorationReport {
            total_apis: endpoints.len(),
            results,
            summary,
        }
    }

    /// Explore every endpoint of one category
    ///
    /// An absent or empty category yields an `UnknownCategory` error value
    /// listing the valid names.
    pub async fn explore_category(
        &self,
        category: &str,
        cancel: &CancellationToken,
    ) -> AppResult<CategoryReport> {
        info!("Exploring APIs for category: {}", category);

        let endpoints: Vec<&EndpointDef> = match self.config.category(category) {
            Some(endpoints) => endpoints.iter().collect(),
            None => {
                return Err(AppError::UnknownCategory {
                    category: category.to_string(),
                    available: self.config.category_names(),
                })
            }
        };

        let results = self
            .run_batch(&endpoints, self.pacing.category_delay, cancel)
            .await;
        let summary = ExplorationSummary::from_results(&results);

        info!(
            "Category {} exploration completed. APIs: {}",
            category,
            endpoints.len()
        );
        Ok(CategoryReport {
            category: category.to_string(),
            total_apis: endpoints.len(),
            results,
            summary,
        })
    }

    /// Explore one endpoint, with an explicit business date or the default
    ///
    /// An empty date string falls back to the default-date path.
    pub async fn explore_single(&self, api_id: &str, biz_date: Option<&str>) -> ApiResponse {
        info!("Exploring single API: {} with date: {:?}", api_id, biz_date);

        let biz_date = biz_date.filter(|date| !date.is_empty());
        self.call_and_persist(api_id, biz_date).await
    }

    /// Issue one call and persist the body on success
    ///
    /// The single write site for response files: both the batch loop and
    /// single-endpoint exploration go through here, so each successful
    /// response is written exactly once.
    async fn call_and_persist(&self, api_id: &str, biz_date: Option<&str>) -> ApiResponse {
        let response = match biz_date {
            Some(date) => self.client.call_with_date(api_id, date).await,
            None => self.client.call_with_default_date(api_id).await,
        };

        if let Some(body) = &response.raw_response {
            if let Err(err) = self.store.save(api_id, body).await {
                warn!("Failed to save API response to file for {}: {}", api_id, err);
            }
        }

        response
    }

    /// Sequentially call every endpoint, `delay` apart, keyed by identifier
    ///
    /// Stops issuing calls once `cancel` fires; results already collected
    /// are kept.
    async fn run_batch(
        &self,
        endpoints: &[&EndpointDef],
        delay: Duration,
        cancel: &CancellationToken,
    ) -> HashMap<String, EndpointResult> {
        let mut results = HashMap::with_capacity(endpoints.len());

        for (index, endpoint) in endpoints.iter().enumerate() {
            if index > 0 {
                tokio::select! {
                    _ = cancel.cancelled() => {}
                    _ = tokio::time::sleep(delay) => {}
                }
            }
            if cancel.is_cancelled() {
                info!(
                    "Exploration cancelled after {} of {} endpoints",
                    results.len(),
                    endpoints.len()
                );
                break;
            }

            debug!("Exploring API: {} ({})", endpoint.id, endpoint.name);
            let response = self.call_and_persist(&endpoint.id, None).await;
            info!(
                "API {} exploration completed: success={}",
                endpoint.id, response.success
            );

            results.insert(
                endpoint.id.clone(),
                EndpointResult::from_response(endpoint, response),
            );
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pacing() {
        let pacing = PacingConfig::default();
        assert_eq!(pacing.all_delay, Duration::from_millis(500));
        assert_eq!(pacing.category_delay, Duration::from_millis(300));
    }
}
