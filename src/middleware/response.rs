use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::api::format::now_display;

pub const SUCCESS_MESSAGE: &str = "operation successful";

/// Wrapper for API responses that automatically adds the success envelope
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful API response (200)
    pub fn success(data: T) -> Self {
        Self {
            data,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::OK;

        // Convert data to JSON Value for consistent envelope format
        let data_value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return crate::error::ApiError::internal_server_error("failed to serialize response data")
                    .into_response();
            }
        };

        (status, Json(envelope(status, &self.message, data_value))).into_response()
    }
}

fn envelope(status: StatusCode, message: &str, data: Value) -> Value {
    let mut body = json!({
        "code": status.as_u16(),
        "message": message,
        "time": now_display(),
    });
    if !data.is_null() {
        body["data"] = data;
    }
    body
}

/// Convenience trait for easy conversion to ApiResponse
pub trait IntoApiResponse<T: Serialize> {
    fn into_api_response(self) -> ApiResponse<T>;
}

impl<T: Serialize> IntoApiResponse<T> for T {
    fn into_api_response(self) -> ApiResponse<T> {
        ApiResponse::success(self)
    }
}

// Convenience type alias
pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
