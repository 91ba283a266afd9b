use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{SecurityConfig, DEFAULT_JWT_EXPIRY_HOURS, JWT_EXPIRY_HOURS_RANGE};

/// Claims carried by session tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: i32,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("Token generation error: {0}")]
    TokenGeneration(jsonwebtoken::errors::Error),

    #[error("Token lifetime overflows the clock")]
    ExpiryOverflow,

    #[error("Invalid token: {0}")]
    InvalidToken(jsonwebtoken::errors::Error),

    #[error("Blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Password hashing and bearer token issuance/verification
#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(secret: &str, token_ttl: Duration, bcrypt_cost: u32) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl,
            bcrypt_cost,
        }
    }

    pub fn from_config(config: &SecurityConfig) -> Self {
        let token_ttl = Some(config.jwt_expiry_hours)
            .filter(|hours| JWT_EXPIRY_HOURS_RANGE.contains(hours))
            .and_then(|hours| Duration::try_hours(hours as i64))
            .unwrap_or_else(|| {
                tracing::warn!(
                    "Token lifetime of {} hours is out of range, using {} hour(s)",
                    config.jwt_expiry_hours,
                    DEFAULT_JWT_EXPIRY_HOURS
                );
                Duration::hours(DEFAULT_JWT_EXPIRY_HOURS as i64)
            });
        Self::new(&config.jwt_secret, token_ttl, config.bcrypt_cost)
    }

    /// Salted bcrypt hash, computed off the async runtime
    pub async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let password = password.to_owned();
        let cost = self.bcrypt_cost;
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
        Ok(hashed)
    }

    pub async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
        Ok(matches)
    }

    pub fn issue_token(&self, user_id: i32) -> Result<String, AuthError> {
        let now = Utc::now();
        let expires = now
            .checked_add_signed(self.token_ttl)
            .ok_or(AuthError::ExpiryOverflow)?;
        let claims = Claims {
            user_id,
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };
        self.encode_claims(&claims)
    }

    pub(crate) fn encode_claims(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(AuthError::TokenGeneration)
    }

    /// Check signature and expiry. No leeway: a token past `exp` is rejected.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(AuthError::InvalidToken)
    }
}
