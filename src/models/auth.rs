use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::validation::{require_email, require_non_empty, Validate};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), ApiError> {
        require_non_empty("username", &self.username)?;
        require_non_empty("password", &self.password)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), ApiError> {
        require_non_empty("username", &self.username)?;
        require_non_empty("password", &self.password)?;
        require_email("email", &self.email)
    }
}
