//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or invalid session
    #[error("{0}")]
    Unauthorized(String),

    /// Bad request with a field-specific message
    #[error("{0}")]
    BadRequest(String),

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Failure reported by the YouTube Data API
    #[error("{message}")]
    Upstream {
        status: u16,
        message: String,
        details: Value,
    },

    /// Internal server error
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            ApiError::Upstream {
                message, details, ..
            } => json!({
                "error": message,
                "details": details,
            }),
            other => json!({
                "error": other.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Upstream {
            status: err.status().map(|s| s.as_u16()).unwrap_or(500),
            message: err.to_string(),
            details: Value::Null,
        }
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_maps_to_401() {
        let response = ApiError::Unauthorized("User not authenticated".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_bad_request_maps_to_400() {
        let response = ApiError::BadRequest("Comment text is required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_uses_reported_status() {
        let response = ApiError::Upstream {
            status: 403,
            message: "The request is not authorized".to_string(),
            details: json!({"error": {"code": 403}}),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_upstream_defaults_to_500_on_bad_status() {
        let response = ApiError::Upstream {
            status: 1000,
            message: "broken".to_string(),
            details: Value::Null,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
