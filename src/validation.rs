use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Required-field checks for request bodies
pub trait Validate {
    fn validate(&self) -> Result<(), ApiError>;
}

pub fn require_non_empty(field_name: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(invalid_params(format!("field '{}' is required", field_name)));
    }
    Ok(())
}

pub fn require_positive(field_name: &str, value: i64) -> Result<(), ApiError> {
    if value == 0 {
        return Err(invalid_params(format!("field '{}' is required", field_name)));
    }
    Ok(())
}

/// Loose `local@domain.tld` shape check
pub fn require_email(field_name: &str, value: &str) -> Result<(), ApiError> {
    require_non_empty(field_name, value)?;

    let valid = match value.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(invalid_params(format!("field '{}' must be a valid email address", field_name)));
    }
    Ok(())
}

pub fn invalid_params(reason: impl std::fmt::Display) -> ApiError {
    ApiError::bad_request(format!("invalid request parameters: {}", reason))
}

/// JSON body extractor that turns parse and validation failures into 400 envelopes
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| invalid_params(rejection.body_text()))?;

        value.validate()?;
        Ok(Self(value))
    }
}
