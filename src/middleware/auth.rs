use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{validate_jwt, Claims};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user context extracted from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: String,
    pub username: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
        }
    }
}

/// JWT authentication middleware that validates tokens and extracts user context
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = authenticate(request.headers(), &state)?;

    tracing::debug!("Authenticated request for user '{}'", claims.username);

    // Convert claims to AuthUser and inject into request
    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Validate the bearer token carried by `headers`
pub fn authenticate(headers: &HeaderMap, state: &AppState) -> Result<Claims, ApiError> {
    let token = extract_bearer_token(headers)?;
    Ok(validate_jwt(token, &state.config.jwt)?)
}

/// Extract JWT token from Authorization header (`Bearer <token>`)
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("missing authentication token"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("invalid token format"))?;

    if auth_str.is_empty() {
        return Err(ApiError::unauthorized("missing authentication token"));
    }

    let parts: Vec<&str> = auth_str.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", token] if !token.is_empty() => Ok(*token),
        _ => Err(ApiError::unauthorized("invalid token format")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn accepts_bearer_token() {
        let headers = headers("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn missing_header_is_reported() {
        let err = extract_bearer_token(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.message(), "missing authentication token");
    }

    #[test]
    fn malformed_headers_are_rejected() {
        for value in ["abc.def.ghi", "Basic abc", "Bearer", "Bearer a b", "bearer abc", "Bearer "] {
            let err = extract_bearer_token(&headers(value)).unwrap_err();
            assert_eq!(err.message(), "invalid token format", "header {:?}", value);
        }
    }
}
