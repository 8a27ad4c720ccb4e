use serde_json::{json, Value};

use crate::api::format::now_display;
use crate::middleware::{ApiResult, IntoApiResponse};
use crate::models::{Device, DeviceRegisterRequest, DeviceStatus};
use crate::validation::ValidJson;

/// POST /api/v1/device/register - validate and echo; nothing is stored
pub async fn register_post(ValidJson(req): ValidJson<DeviceRegisterRequest>) -> ApiResult<Value> {
    tracing::info!("Device registration: {} ({})", req.device_id, req.device_name);

    let device = Device {
        device_id: req.device_id,
        device_name: req.device_name,
        location: req.location,
        status: DeviceStatus::Registered,
        last_active: now_display(),
    };

    Ok(json!({
        "message": "device registered",
        "device": device,
        "register_time": device.last_active,
    })
    .into_api_response())
}
