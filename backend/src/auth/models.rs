//! Data structures for authentication-related requests and responses.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request payload
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response containing both tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub accesstoken: String,
    pub refreshtoken: String,
}

/// Renewal and logout request carrying a refresh token. The token is
/// optional here so a missing token can be reported as 401 rather than as a
/// deserialization failure.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub token: Option<String>,
}

/// Renewal response carrying the fresh access token only; the refresh token
/// is reused, not rotated.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub accesstoken: String,
}
