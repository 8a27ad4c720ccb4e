use axum::{extract::State, http::HeaderMap};
use chrono::{DateTime, Local};
use serde_json::{json, Value};

use crate::api::format::display_time;
use crate::middleware::auth::authenticate;
use crate::middleware::{ApiResult, IntoApiResponse};
use crate::state::AppState;

/// GET /api/v1/auth/verify - check the bearer token on this request
pub async fn verify_get(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Value> {
    let claims = authenticate(&headers, &state)?;

    let expires_at = DateTime::from_timestamp(claims.exp, 0).map(|t| display_time(&t.with_timezone(&Local)));

    Ok(json!({
        "message": "token verified",
        "valid": true,
        "user_id": claims.user_id,
        "username": claims.username,
        "expires_at": expires_at,
    })
    .into_api_response())
}
