use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Request},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

/// One access-log line per request
pub async fn request_logger_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let version = request.version();
    let client_ip = client_ip(
        request.headers(),
        request.extensions().get::<ConnectInfo<SocketAddr>>().map(|c| c.0),
    );
    let start = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        method = %method,
        path = %path,
        version = ?version,
        status = response.status().as_u16(),
        latency = ?start.elapsed(),
        client_ip = %client_ip,
        "request completed"
    );

    response
}

/// X-Forwarded-For (first hop), then X-Real-IP, then the socket address
pub fn client_ip(headers: &HeaderMap, remote: Option<SocketAddr>) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim())
        .filter(|v| !v.is_empty());
    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    let real_ip = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim())
        .filter(|v| !v.is_empty());
    if let Some(ip) = real_ip {
        return ip.to_string();
    }

    remote.map(|addr| addr.ip().to_string()).unwrap_or_else(|| "-".to_string())
}
