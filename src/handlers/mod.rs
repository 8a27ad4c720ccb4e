// handlers/mod.rs - route groups under /api/v1
//
// Public:    /health, /auth/*
// Protected: /detection/*, /jobs/*, /device/* (JWT only when security.require_auth is set)
pub mod auth;
pub mod detection;
pub mod device;
pub mod health;
pub mod jobs;

use crate::error::ApiError;

/// Path ids must carry something other than whitespace
pub(crate) fn require_path_id<'a>(id: &'a str, what: &str) -> Result<&'a str, ApiError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::bad_request(format!("{} id must not be empty", what)));
    }
    Ok(id)
}
