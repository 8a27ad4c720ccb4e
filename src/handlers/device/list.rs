use chrono::Duration;
use serde_json::{json, Value};

use crate::api::format::display_ago;
use crate::middleware::{ApiResult, IntoApiResponse};
use crate::models::{Device, DeviceStatus};

/// GET /api/v1/device/list
pub async fn list_get() -> ApiResult<Value> {
    let devices = vec![
        Device {
            device_id: "dev_001".to_string(),
            device_name: "Orchard sensor A".to_string(),
            location: "north orchard, zone 1".to_string(),
            status: DeviceStatus::Online,
            last_active: display_ago(Duration::zero()),
        },
        Device {
            device_id: "dev_002".to_string(),
            device_name: "Orchard sensor B".to_string(),
            location: "south orchard, zone 3".to_string(),
            status: DeviceStatus::Offline,
            last_active: display_ago(Duration::hours(2)),
        },
    ];

    Ok(json!({
        "total": devices.len(),
        "devices": devices,
    })
    .into_api_response())
}
