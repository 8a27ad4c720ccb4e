use std::time::{Duration, Instant};

use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::state::AppState;

pub const RESPONSE_TIME_HEADER: &str = "x-response-time";

/// Adds `X-Response-Time` and warns about slow requests
pub async fn timing_middleware(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let mut response = next.run(request).await;

    let latency = start.elapsed();
    if latency > Duration::from_millis(state.config.server.slow_request_ms) {
        tracing::warn!("Slow request: {} {} took {:?}", method, path, latency);
    }

    if let Ok(value) = HeaderValue::from_str(&format!("{:?}", latency)) {
        response.headers_mut().insert(RESPONSE_TIME_HEADER, value);
    }

    response
}

/// Fails requests that outlive the configured timeout with a 408 envelope
pub async fn request_timeout_middleware(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    match tokio::time::timeout(timeout, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!("Request exceeded timeout of {:?}", timeout);
            ApiError::request_timeout("request timed out").into_response()
        }
    }
}
