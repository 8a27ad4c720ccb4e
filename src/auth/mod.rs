use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: String,
    pub username: String,
    pub exp: i64,
    pub iat: i64,
    pub nbf: i64,
}

impl Claims {
    pub fn new(user_id: String, username: String, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            user_id,
            username,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
        }
    }

    /// Claims for a freshly logged in user, valid for the configured lifetime
    pub fn for_user(username: &str, config: &JwtConfig) -> Self {
        Self::new(
            user_id_for(username),
            username.to_string(),
            Duration::hours(config.expire_hours as i64),
        )
    }
}

/// Stable user id derived from the username until a user store exists
pub fn user_id_for(username: &str) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, username.as_bytes()).to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
    #[error("Invalid JWT secret")]
    InvalidSecret,
    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),
}

pub fn generate_jwt(claims: &Claims, config: &JwtConfig) -> Result<String, JwtError> {
    if config.secret_key.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(config.secret_key.as_bytes());
    let header = Header::new(Algorithm::HS256);

    encode(&header, claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Verify signature, expiry and not-before, returning the embedded claims
pub fn validate_jwt(token: &str, config: &JwtConfig) -> Result<Claims, JwtError> {
    if config.secret_key.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_nbf = true;

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

    Ok(token_data.claims)
}
