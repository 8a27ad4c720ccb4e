use axum::http::{HeaderValue, Request};
use chrono::Utc;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};

/// Generates `req_<unix nanos>` ids for requests that arrive without `X-Request-ID`
#[derive(Clone, Copy, Debug, Default)]
pub struct TimestampRequestId;

impl MakeRequestId for TimestampRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&generate_request_id()).ok().map(RequestId::new)
    }
}

pub fn generate_request_id() -> String {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("req_{}", nanos)
}

/// Keeps an incoming `X-Request-ID`, otherwise assigns one
pub fn set_request_id_layer() -> SetRequestIdLayer<TimestampRequestId> {
    SetRequestIdLayer::x_request_id(TimestampRequestId)
}

/// Echoes the request id on the response
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_prefixed() {
        let id = generate_request_id();
        assert!(id.starts_with("req_"));
        assert!(id["req_".len()..].chars().all(|c| c.is_ascii_digit()));
    }
}
