//! Call result and exploration report types
//!
//! One `ApiResponse` is created per upstream call attempt and never mutated
//! afterwards; the report types aggregate them per batch.

use crate::config::EndpointDef;
use crate::services::analyzer::{self, StructureOutcome};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Outcome of one upstream call attempt
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    /// Endpoint identifier the call was issued for
    pub api_id: String,
    /// Raw body text, present only on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
    /// Whether the upstream returned a 2xx response
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub timestamp: DateTime<Utc>,
    /// Elapsed wall time of the call
    pub response_time_ms: u64,
    /// Real upstream status when known, 500 for non-HTTP failures
    pub http_status: u16,
}

impl ApiResponse {
    pub fn success(
        api_id: impl Into<String>,
        raw_response: String,
        http_status: u16,
        response_time_ms: u64,
    ) -> Self {
        Self {
            api_id: api_id.into(),
            raw_response: Some(raw_response),
            success: true,
            error_message: None,
            timestamp: Utc::now(),
            response_time_ms,
            http_status,
        }
    }

    pub fn failure(
        api_id: impl Into<String>,
        error_message: String,
        http_status: u16,
        response_time_ms: u64,
    ) -> Self {
        Self {
            api_id: api_id.into(),
            raw_response: None,
            success: false,
            error_message: Some(error_message),
            timestamp: Utc::now(),
            response_time_ms,
            http_status,
        }
    }
}

/// Per-endpoint entry of a batch exploration
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointResult {
    pub api_id: String,
    pub name: String,
    pub category: String,
    pub success: bool,
    pub http_status: u16,
    pub response_time_ms: u64,
    pub timestamp: DateTime<Utc>,
    /// Raw body size in bytes, successes only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_size: Option<usize>,
    /// Structure report (or analysis failure), successes only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<StructureOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl EndpointResult {
    /// Combine an endpoint definition with its call outcome
    pub fn from_response(endpoint: &EndpointDef, response: ApiResponse) -> Self {
        let (response_size, structure) = match &response.raw_response {
            Some(body) => (Some(body.len()), Some(analyzer::analyze_outcome(body))),
            None => (None, None),
        };

        Self {
            api_id: endpoint.id.clone(),
            name: endpoint.name.clone(),
            category: endpoint.category.clone(),
            success: response.success,
            http_status: response.http_status,
            response_time_ms: response.response_time_ms,
            timestamp: response.timestamp,
            response_size,
            structure,
            error_message: response.error_message,
        }
    }
}

/// Rolled-up success/failure totals of one batch
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorationSummary {
    pub total: usize,
    pub success: usize,
    pub failure: usize,
    /// `success / total`, or 0.0 for an empty batch
    pub success_rate: f64,
}

impl ExplorationSummary {
    pub fn from_results(results: &HashMap<String, EndpointResult>) -> Self {
        let total = results.len();
        let success = results.values().filter(|result| result.success).count();
        let failure = total - success;
        let success_rate = if total > 0 {
            success as f64 / total as f64
        } else {
            0.0
        };

        Self {
            total,
            success,
            failure,
            success_rate,
        }
    }
}

/// Aggregate result of exploring the whole catalog
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorationReport {
    /// Number of endpoints the batch was asked to explore
    pub total_apis: usize,
    pub results: HashMap<String, EndpointResult>,
    pub summary: ExplorationSummary,
}

/// Aggregate result of exploring one category
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReport {
    pub category: String,
    pub total_apis: usize,
    pub results: HashMap<String, EndpointResult>,
    pub summary: ExplorationSummary,
}

/// Response payload of a single-endpoint exploration
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleExploration {
    pub api_id: String,
    pub success: bool,
    pub http_status: u16,
    pub response_time_ms: u64,
    pub timestamp: DateTime<Utc>,
    /// Pretty-printed body, successes only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<StructureOutcome>,
}

impl From<ApiResponse> for SingleExploration {
    fn from(response: ApiResponse) -> Self {
        let (pretty, structure) = match &response.raw_response {
            Some(body) => (
                Some(analyzer::pretty_print(body)),
                Some(analyzer::analyze_outcome(body)),
            ),
            None => (None, None),
        };

        Self {
            api_id: response.api_id,
            success: response.success,
            http_status: response.http_status,
            response_time_ms: response.response_time_ms,
            timestamp: response.timestamp,
            response: pretty,
            error_message: response.error_message,
            structure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> EndpointDef {
        EndpointDef {
            id: "sto_bydd_trd".to_string(),
            name: "Daily trade".to_string(),
            category: "stock".to_string(),
        }
    }

    #[test]
    fn test_success_result_carries_structure() {
        let response =
            ApiResponse::success("sto_bydd_trd", r#"{"OutBlock_1": []}"#.to_string(), 200, 12);
        let result = EndpointResult::from_response(&endpoint(), response);

        assert!(result.success);
        assert_eq!(result.response_size, Some(18));
        assert!(matches!(
            result.structure,
            Some(StructureOutcome::Report(_))
        ));
        assert!(result.error_message.is_none());
    }

    #[test]
    fn test_failure_result_carries_message() {
        let response =
            ApiResponse::failure("sto_bydd_trd", "HTTP 500: upstream".to_string(), 500, 8);
        let result = EndpointResult::from_response(&endpoint(), response);

        assert!(!result.success);
        assert!(result.structure.is_none());
        assert_eq!(result.error_message.as_deref(), Some("HTTP 500: upstream"));
    }

    #[test]
    fn test_summary_counts() {
        let mut results = HashMap::new();
        results.insert(
            "a".to_string(),
            EndpointResult::from_response(
                &endpoint(),
                ApiResponse::success("a", "{}".to_string(), 200, 1),
            ),
        );
        results.insert(
            "b".to_string(),
            EndpointResult::from_response(
                &endpoint(),
                ApiResponse::failure("b", "HTTP 404: gone".to_string(), 404, 1),
            ),
        );

        let summary = ExplorationSummary::from_results(&results);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.success, 1);
        assert_eq!(summary.failure, 1);
        assert!((summary.success_rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_summary_rate_is_zero() {
        let summary = ExplorationSummary::from_results(&HashMap::new());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.success_rate, 0.0);
    }

    #[test]
    fn test_single_exploration_pretty_prints_body() {
        let response = ApiResponse::success("a", r#"{"x":1}"#.to_string(), 200, 3);
        let single = SingleExploration::from(response);

        assert_eq!(single.response.as_deref(), Some("{\n  \"x\": 1\n}"));
        assert!(matches!(
            single.structure,
            Some(StructureOutcome::Report(_))
        ));
    }
}
