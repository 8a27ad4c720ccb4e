use serde_json::{json, Value};

use crate::api::format::now_display;
use crate::middleware::{ApiResult, IntoApiResponse};
use crate::models::RegisterRequest;
use crate::validation::ValidJson;

/// POST /api/v1/auth/register - validate and echo the new account
pub async fn register_post(ValidJson(req): ValidJson<RegisterRequest>) -> ApiResult<Value> {
    tracing::info!("Registration request for user '{}'", req.username);

    Ok(json!({
        "message": "user registered",
        "user": {
            "username": req.username,
            "email": req.email,
            "register_time": now_display(),
        }
    })
    .into_api_response())
}
