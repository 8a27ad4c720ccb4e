use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::state::AppState;

const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOW_HEADERS: &str =
    "Origin, Content-Type, Content-Length, Accept-Encoding, X-CSRF-Token, Authorization";

/// CORS headers on every response. Any OPTIONS request is answered with 204 here.
pub async fn cors_middleware(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    let preflight = request.method() == Method::OPTIONS;

    let mut response = if preflight {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    apply_cors_headers(response.headers_mut(), &state.config.security.cors_origins, origin.as_deref());
    response
}

fn apply_cors_headers(headers: &mut HeaderMap, allowed_origins: &[String], origin: Option<&str>) {
    if let Some(allow_origin) = resolve_origin(allowed_origins, origin) {
        if let Ok(value) = HeaderValue::from_str(&allow_origin) {
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
        }
    }
    headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
    headers.insert(header::ACCESS_CONTROL_EXPOSE_HEADERS, HeaderValue::from_static("Content-Length"));
    headers.insert(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, HeaderValue::from_static("true"));
}

/// `*` when wildcarded, else the request origin if it is listed
fn resolve_origin(allowed_origins: &[String], origin: Option<&str>) -> Option<String> {
    if allowed_origins.iter().any(|o| o == "*") {
        return Some("*".to_string());
    }
    origin
        .filter(|o| allowed_origins.iter().any(|allowed| allowed == o))
        .map(|o| o.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_allows_everything() {
        let allowed = vec!["*".to_string()];
        assert_eq!(resolve_origin(&allowed, None).as_deref(), Some("*"));
        assert_eq!(resolve_origin(&allowed, Some("https://x.io")).as_deref(), Some("*"));
    }

    #[test]
    fn listed_origin_is_mirrored() {
        let allowed = vec!["https://app.example.com".to_string()];
        assert_eq!(
            resolve_origin(&allowed, Some("https://app.example.com")).as_deref(),
            Some("https://app.example.com")
        );
        assert_eq!(resolve_origin(&allowed, Some("https://evil.example.com")), None);
        assert_eq!(resolve_origin(&allowed, None), None);
    }
}
