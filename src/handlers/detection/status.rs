use axum::extract::Path;
use serde_json::{json, Value};

use crate::api::format::now_display;
use crate::handlers::require_path_id;
use crate::middleware::{ApiResult, IntoApiResponse};

/// GET /api/v1/detection/status/:id - canned progress report
pub async fn status_get(Path(task_id): Path<String>) -> ApiResult<Value> {
    let task_id = require_path_id(&task_id, "task")?;

    Ok(json!({
        "task_id": task_id,
        "status": "processing",
        "progress": 75,
        "estimated_time": "2 minutes",
        "update_time": now_display(),
    })
    .into_api_response())
}
