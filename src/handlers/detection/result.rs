use axum::extract::Path;
use serde_json::{json, Value};

use crate::api::format::now_display;
use crate::handlers::require_path_id;
use crate::middleware::{ApiResult, IntoApiResponse};

/// GET /api/v1/detection/result/:id - canned detection result
pub async fn result_get(Path(task_id): Path<String>) -> ApiResult<Value> {
    let task_id = require_path_id(&task_id, "task")?;

    Ok(json!({
        "task_id": task_id,
        "status": "completed",
        "result": "pest detected",
        "confidence": 0.85,
        "detection_time": now_display(),
        "details": {
            "pest_type": "longhorn beetle",
            "severity": "moderate",
            "recommendation": "treat the affected trees promptly",
        }
    })
    .into_api_response())
}
