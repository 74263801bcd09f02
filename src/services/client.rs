//! HTTP client service
//!
//! Encapsulates HTTP communication with the KRX data API

use crate::config::ApiConfig;
use crate::models::ApiResponse;
use anyhow::{Context, Result};
use chrono::{Duration, Local};
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, error};

/// Date format of the `bizdate` query parameter
const BIZDATE_FORMAT: &str = "%Y%m%d";

/// KRX data API client
///
/// All call methods are total: transport and HTTP failures are folded into
/// failure `ApiResponse` values instead of being propagated, so one bad
/// endpoint can never abort a batch.
#[derive(Debug, Clone)]
pub struct KrxClient {
    client: Client,
    api: ApiConfig,
}

impl KrxClient {
    /// Create a new client instance
    pub fn new(api: ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(api.timeout())
            .user_agent(concat!("krx-explorer/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, api })
    }

    /// Issue one GET request for an endpoint with extra query parameters
    pub async fn call(&self, api_id: &str, params: &[(&str, &str)]) -> ApiResponse {
        let started = Instant::now();
        let url = format!("{}/api/{}", self.api.base_url, api_id);

        let mut query: Vec<(&str, &str)> = vec![("format", self.api.default_format.as_str())];
        if !self.api.key.is_empty() {
            query.push(("key", self.api.key.as_str()));
        }
        query.extend_from_slice(params);

        debug!("Calling KRX API: {} with parameters: {:?}", url, query);

        let result = self.client.get(&url).query(&query).send().await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(response) => {
                let status = response.status();

                if status.is_success() {
                    match response.text().await {
                        Ok(body) => {
                            debug!(
                                "KRX API response received for {}: {} chars in {}ms",
                                api_id,
                                body.len(),
                                elapsed_ms
                            );
                            ApiResponse::success(api_id, body, status.as_u16(), elapsed_ms)
                        }
                        Err(err) => {
                            error!("Failed to read KRX API body for {}: {}", api_id, err);
                            ApiResponse::failure(
                                api_id,
                                format!("Unexpected error: {}", err),
                                500,
                                elapsed_ms,
                            )
                        }
                    }
                } else {
                    let body = response.text().await.unwrap_or_default();
                    error!("KRX API error for {}: {} - {}", api_id, status, body);
                    ApiResponse::failure(
                        api_id,
                        format!("HTTP {}: {}", status.as_u16(), body),
                        status.as_u16(),
                        elapsed_ms,
                    )
                }
            }
            Err(err) => {
                error!("Unexpected error calling KRX API {}: {}", api_id, err);
                let status = err.status().map(|s| s.as_u16()).unwrap_or(500);
                ApiResponse::failure(
                    api_id,
                    format!("Unexpected error: {}", err),
                    status,
                    elapsed_ms,
                )
            }
        }
    }

    /// Call an endpoint for an explicit business date
    pub async fn call_with_date(&self, api_id: &str, biz_date: &str) -> ApiResponse {
        self.call(api_id, &[("bizdate", biz_date)]).await
    }

    /// Call an endpoint for the default business date
    ///
    /// Uses yesterday, since the upstream typically has no same-day data.
    pub async fn call_with_default_date(&self, api_id: &str) -> ApiResponse {
        let date = default_biz_date();
        self.call(api_id, &[("bizdate", date.as_str())]).await
    }
}

/// Yesterday in `yyyyMMdd` form, local calendar
pub fn default_biz_date() -> String {
    (Local::now() - Duration::days(1))
        .format(BIZDATE_FORMAT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = KrxClient::new(ApiConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_default_biz_date_shape() {
        let date = default_biz_date();
        assert_eq!(date.len(), 8);
        assert!(date.chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_network_failure_becomes_failure_response() {
        let api = ApiConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            ..ApiConfig::default()
        };
        let client = KrxClient::new(api).unwrap();

        let response = client.call_with_default_date("sto_bydd_trd").await;
        assert!(!response.success);
        assert_eq!(response.http_status, 500);
        assert!(response
            .error_message
            .as_deref()
            .unwrap_or_default()
            .starts_with("Unexpected error:"));
        assert!(response.raw_response.is_none());
    }
}
