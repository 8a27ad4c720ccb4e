use axum::extract::Path;
use chrono::Duration;
use serde_json::{json, Value};

use crate::api::format::display_ago;
use crate::handlers::require_path_id;
use crate::middleware::{ApiResult, IntoApiResponse};
use crate::models::DeviceStatus;

/// GET /api/v1/device/:id
pub async fn info_get(Path(device_id): Path<String>) -> ApiResult<Value> {
    let device_id = require_path_id(&device_id, "device")?;

    Ok(json!({
        "device_id": device_id,
        "device_name": "Orchard sensor A",
        "location": "north orchard, zone 1",
        "status": DeviceStatus::Online,
        "last_active": display_ago(Duration::zero()),
        "firmware_version": "v1.2.3",
        "last_maintenance": "2024-01-15",
        "total_detections": 156,
    })
    .into_api_response())
}
