//! Error handling utilities for API responses.
//!
//! Provides the standard response wrapper and the conversion between
//! service-layer errors and HTTP status codes. Every error crosses the
//! request boundary exactly once, here.

use crate::errors::ServiceError;
use axum::http::StatusCode;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Standard API response wrapper for all endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Indicates if the request was successful
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message
    pub message: String,
    /// Request timestamp
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            message: message.into(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Maps a `ServiceError` to the HTTP status code and body the client sees.
pub fn service_error_to_http(error: ServiceError) -> (StatusCode, String) {
    let status = match &error {
        ServiceError::Validation { .. } => StatusCode::BAD_REQUEST,
        ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
        ServiceError::AlreadyExists { .. } => StatusCode::CONFLICT,
        ServiceError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        ServiceError::Forbidden { .. } => StatusCode::FORBIDDEN,
        ServiceError::ExternalService { .. } => StatusCode::BAD_GATEWAY,
        ServiceError::Database { .. } | ServiceError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    if status.is_server_error() {
        tracing::error!(%error, "request failed");
    }

    (status, error.to_string())
}
