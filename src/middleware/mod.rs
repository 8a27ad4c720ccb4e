pub mod auth;
pub mod cors;
pub mod logging;
pub mod recovery;
pub mod request_id;
pub mod response;
pub mod timing;

pub use auth::{jwt_auth_middleware, AuthUser};
pub use cors::cors_middleware;
pub use logging::request_logger_middleware;
pub use recovery::recovery_layer;
pub use request_id::{propagate_request_id_layer, set_request_id_layer};
pub use response::{ApiResponse, ApiResult, IntoApiResponse};
pub use timing::{request_timeout_middleware, timing_middleware};
