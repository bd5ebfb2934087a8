// Request-level errors and the JSON response envelope
//
// Service failures never reach this layer: the analyzer absorbs them into the
// fallback report. What remains is bad input, throttling and the unexpected.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::questionnaire::{FieldViolation, ValidationError};

/// Generic message for unexpected failures; details stay in the logs
pub const INTERNAL_ERROR_MESSAGE: &str =
    "An error occurred while processing your request. Please try again.";

pub const RATE_LIMITED_MESSAGE: &str = "Too many requests. Please try again later.";

pub const NOT_FOUND_MESSAGE: &str = "Endpoint not found";

pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Request body too large";

/// Response envelope shared by every endpoint
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldViolation>>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            details: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            details: None,
        }
    }

    pub fn invalid(err: &ValidationError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(err.to_string()),
            details: Some(err.violations.clone()),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid input data: {0}")]
    MalformedBody(String),

    #[error("request body too large")]
    PayloadTooLarge,

    #[error("rate limit exceeded")]
    RateLimited { retry_after_secs: u64 },

    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ApiResponse<()> {
        match self {
            AppError::Validation(err) => ApiResponse::invalid(err),
            AppError::MalformedBody(_) => ApiResponse::failure(self.to_string()),
            AppError::PayloadTooLarge => ApiResponse::failure(PAYLOAD_TOO_LARGE_MESSAGE),
            AppError::RateLimited { .. } => ApiResponse::failure(RATE_LIMITED_MESSAGE),
            AppError::NotFound => ApiResponse::failure(NOT_FOUND_MESSAGE),
            AppError::Internal(_) => ApiResponse::failure(INTERNAL_ERROR_MESSAGE),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Internal(e) => tracing::error!(error = %e, "Request failed"),
            AppError::Validation(e) => {
                tracing::info!(violations = e.violations.len(), "Validation failed")
            }
            other => tracing::debug!(error = %other, "Request rejected"),
        }

        let status = self.status();
        let mut response = (status, Json(self.body())).into_response();

        if let AppError::RateLimited { retry_after_secs } = self {
            if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }

        response
    }
}
