//! JWT token utilities for authentication and authorization.
//!
//! Provides token creation and validation for the session lifecycle. Access
//! tokens carry a short embedded expiry; refresh tokens carry none, because a
//! refresh token is honored only while it is still present in the refresh
//! token store. Access and refresh tokens are signed with separate secrets.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::ServiceError;

/// JWT claims carried by both access and refresh tokens.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// User ID
    pub sub: i64,
    /// Username
    pub name: String,
    /// Token issued at timestamp
    pub iat: i64,
    /// Token expiration timestamp (absent on refresh tokens)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Random token id, set on refresh tokens so that two logins in the same
    /// second still produce distinct token values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

/// Why a token was rejected. All variants map to the same external effect
/// (reject) but are kept distinct for logging.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("token expired")]
    Expired,
    #[error("bad signature")]
    BadSignature,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            _ => TokenError::Malformed,
        }
    }
}

impl From<TokenError> for ServiceError {
    fn from(err: TokenError) -> Self {
        ServiceError::forbidden(err.to_string())
    }
}

/// Issues and verifies signed tokens for the session controller.
pub struct TokenIssuer {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_validation: Validation,
    refresh_validation: Validation,
    access_ttl: Duration,
}

impl TokenIssuer {
    /// Create a new TokenIssuer from configured secrets.
    ///
    /// An empty secret is a configuration error and fails here, at
    /// construction, rather than at the first signing call.
    pub fn new(config: &Config) -> Result<Self, ServiceError> {
        if config.access_token_secret.is_empty() {
            return Err(ServiceError::internal("ACCESS_TOKEN_SECRET is empty"));
        }
        if config.refresh_token_secret.is_empty() {
            return Err(ServiceError::internal("REFRESH_TOKEN_SECRET is empty"));
        }

        let mut access_validation = Validation::new(Algorithm::HS256);
        access_validation.validate_exp = true;
        // Access TTLs can be as short as a few seconds; the default 60s leeway
        // would make such tokens effectively never expire.
        access_validation.leeway = 0;

        let mut refresh_validation = Validation::new(Algorithm::HS256);
        refresh_validation.validate_exp = false;
        refresh_validation.required_spec_claims.clear();

        Ok(TokenIssuer {
            access_encoding: EncodingKey::from_secret(config.access_token_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_token_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            access_validation,
            refresh_validation,
            access_ttl: Duration::seconds(config.access_token_ttl_seconds as i64),
        })
    }

    /// Generate a short-lived access token for the given user.
    pub fn issue_access(&self, user_id: i64, username: &str) -> Result<String, ServiceError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            name: username.to_string(),
            iat: now.timestamp(),
            exp: Some((now + self.access_ttl).timestamp()),
            jti: None,
        };

        encode(&Header::default(), &claims, &self.access_encoding)
            .map_err(|e| ServiceError::internal(format!("Token generation failed: {}", e)))
    }

    /// Generate a refresh token. No expiry is embedded; revocation happens by
    /// deleting the token from the refresh token store.
    pub fn issue_refresh(&self, user_id: i64, username: &str) -> Result<String, ServiceError> {
        let claims = Claims {
            sub: user_id,
            name: username.to_string(),
            iat: Utc::now().timestamp(),
            exp: None,
            jti: Some(Uuid::new_v4().to_string()),
        };

        encode(&Header::default(), &claims, &self.refresh_encoding).map_err(|e| {
            ServiceError::internal(format!("Refresh token generation failed: {}", e))
        })
    }

    /// Validate and decode an access token.
    pub fn verify_access(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.access_decoding, &self.access_validation)
            .map(|data| data.claims)
            .map_err(TokenError::from)
    }

    /// Validate and decode a refresh token.
    pub fn verify_refresh(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.refresh_decoding, &self.refresh_validation)
            .map(|data| data.claims)
            .map_err(TokenError::from)
    }
}
