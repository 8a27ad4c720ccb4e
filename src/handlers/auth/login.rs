use axum::extract::State;
use serde_json::{json, Value};

use crate::api::format::now_display;
use crate::auth::{generate_jwt, Claims};
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::LoginRequest;
use crate::state::AppState;
use crate::validation::ValidJson;

/// POST /api/v1/auth/login - issue a JWT for the presented username
///
/// Credentials are not checked; any non-empty username/password pair gets a
/// token signed with the configured secret.
pub async fn login_post(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> ApiResult<Value> {
    let jwt_config = &state.config.jwt;
    let claims = Claims::for_user(&req.username, jwt_config);
    let token = generate_jwt(&claims, jwt_config)?;

    tracing::info!("Issued token for user '{}'", req.username);

    Ok(ApiResponse::success(json!({
        "token": token,
        "token_type": "Bearer",
        "expires_in": jwt_config.expire_hours * 3600,
        "user": {
            "user_id": claims.user_id,
            "username": req.username,
            "login_time": now_display(),
        }
    })))
}
