use std::any::Any;

use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::ApiError;

pub type RecoveryLayer = CatchPanicLayer<fn(Box<dyn Any + Send + 'static>) -> Response>;

/// Turns handler panics into a 500 envelope
pub fn recovery_layer() -> RecoveryLayer {
    CatchPanicLayer::custom(handle_panic as fn(Box<dyn Any + Send + 'static>) -> Response)
}

pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        Some(s.as_str())
    } else {
        err.downcast_ref::<&str>().copied()
    };

    let message = match detail {
        Some(detail) => {
            tracing::error!("Recovered from panic: {}", detail);
            format!("internal server error: {}", detail)
        }
        None => {
            tracing::error!("Recovered from panic with non-string payload");
            "internal server error".to_string()
        }
    };

    ApiError::internal_server_error(message).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn string_payload_is_reported() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn opaque_payload_still_500() {
        let response = handle_panic(Box::new(42_u32));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
