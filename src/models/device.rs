use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::validation::{require_non_empty, Validate};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceRegisterRequest {
    pub device_id: String,
    pub device_name: String,
    #[serde(default)]
    pub location: String,
}

impl Validate for DeviceRegisterRequest {
    fn validate(&self) -> Result<(), ApiError> {
        require_non_empty("device_id", &self.device_id)?;
        require_non_empty("device_name", &self.device_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Offline,
    Registered,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub device_id: String,
    pub device_name: String,
    pub location: String,
    pub status: DeviceStatus,
    pub last_active: String,
}
