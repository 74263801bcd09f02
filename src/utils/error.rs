//! Error handling module
//!
//! Defines error types and handling logic used in the project

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// JSON body could not be parsed for structural analysis
    #[error("Invalid JSON format: {0}")]
    Analysis(#[from] serde_json::Error),

    /// Requested category does not exist in the endpoint catalog
    #[error("Category not found or empty: {category}")]
    UnknownCategory {
        category: String,
        available: Vec<String>,
    },

    /// Response file persistence failed
    #[error("Failed to persist response: {0}")]
    Storage(#[from] std::io::Error),
}

/// Error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error type
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error message
    pub message: String,
}

/// Unknown-category payload, listing the valid alternatives
#[derive(Debug, Serialize, Deserialize)]
pub struct UnknownCategoryResponse {
    pub error: String,
    #[serde(rename = "availableCategories")]
    pub available_categories: Vec<String>,
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Analysis(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UnknownCategory { .. } => StatusCode::NOT_FOUND,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Analysis(_) => "analysis_error",
            AppError::UnknownCategory { .. } => "not_found_error",
            AppError::Storage(_) => "storage_error",
        }
    }
}

/// Implement IntoResponse trait to allow errors to be returned directly as HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            AppError::UnknownCategory {
                category,
                available,
            } => {
                tracing::warn!("Unknown category requested: {}", category);
                let body = UnknownCategoryResponse {
                    error: format!("Category not found or empty: {}", category),
                    available_categories: available,
                };
                (status, Json(body)).into_response()
            }
            other => {
                tracing::error!("Application error: {} - Status code: {}", other, status);
                let body = ErrorResponse {
                    error_type: other.error_type().to_string(),
                    message: other.to_string(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;
