// Middleware for rate limiting and panic recovery

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;

use super::rate_limit::RateLimiter;
use crate::errors::{ApiResponse, AppError, INTERNAL_ERROR_MESSAGE};

/// Client key for rate limiting: the peer address when known
fn client_key(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Reject requests over the per-client limit with 429
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let client = client_key(&request);

    match limiter.check(&client) {
        Ok(()) => next.run(request).await,
        Err(retry_after_secs) => {
            tracing::warn!(client = %client, retry_after_secs, "Rate limit exceeded");
            AppError::RateLimited { retry_after_secs }.into_response()
        }
    }
}

/// Turn a handler panic into the generic 500 envelope
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(panic = %detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::failure(INTERNAL_ERROR_MESSAGE)),
    )
        .into_response()
}
