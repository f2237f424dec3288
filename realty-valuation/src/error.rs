//! Error types for realty-valuation.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Valuation service errors.
#[derive(Debug, thiserror::Error)]
pub enum ValuationError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Estimation unavailable: {0}")]
    EstimationUnavailable(String),

    #[error("Market data unavailable: {0}")]
    DatasetUnavailable(String),
}

impl ValuationError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::EstimationUnavailable(_) | Self::DatasetUnavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::EstimationUnavailable(_) => "ESTIMATION_UNAVAILABLE",
            Self::DatasetUnavailable(_) => "DATASET_UNAVAILABLE",
        }
    }
}

/// Body rejections (bad JSON, missing or mistyped fields) surface as `InvalidRequest`.
impl From<JsonRejection> for ValuationError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

/// API error body.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ValuationError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "success": false,
            "error": ApiError {
                code: self.code().to_string(),
                message: self.to_string(),
            }
        });

        (self.status(), axum::Json(body)).into_response()
    }
}
