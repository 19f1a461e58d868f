//! Handler functions for authentication-related API endpoints.
//!
//! These functions parse incoming requests, delegate to the
//! `auth::service::AuthService`, and translate service errors into the
//! status codes documented for each route.

use crate::api::common::service_error_to_http;
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::database::models::PublicUser;
use crate::errors::ServiceError;
use crate::state::AppState;
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::Json as ResponseJson,
};

/// Handle user registration: 201 on success, 409 on a duplicate name.
#[axum::debug_handler]
pub async fn register(
    Extension(state): Extension<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, ResponseJson<PublicUser>), (StatusCode, String)> {
    let auth_service = AuthService::new(state.users, state.tokens, state.issuer);

    match auth_service.register(payload).await {
        Ok(user) => Ok((StatusCode::CREATED, ResponseJson(user))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle user login: 200 with both tokens, 400 for an unknown user, 401 for
/// a bad password.
#[axum::debug_handler]
pub async fn login(
    Extension(state): Extension<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<ResponseJson<LoginResponse>, (StatusCode, String)> {
    let auth_service = AuthService::new(state.users, state.tokens, state.issuer);

    match auth_service.login(payload).await {
        Ok(response) => Ok(ResponseJson(response)),
        // The login route reports an unknown user as a bad request, matching
        // the documented external interface.
        Err(ServiceError::NotFound { .. }) => {
            Err((StatusCode::BAD_REQUEST, "Cannot find user".to_string()))
        }
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle access-token renewal: 200 with a new access token, 401 when the
/// refresh token is missing, 403 when it is unknown or invalid.
#[axum::debug_handler]
pub async fn renew_token(
    Extension(state): Extension<AppState>,
    Json(payload): Json<TokenRequest>,
) -> Result<ResponseJson<TokenResponse>, (StatusCode, String)> {
    let auth_service = AuthService::new(state.users, state.tokens, state.issuer);

    match auth_service.renew(payload.token.as_deref()).await {
        Ok(response) => Ok(ResponseJson(response)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle logout: 204 regardless of whether the token was still stored.
#[axum::debug_handler]
pub async fn logout(
    Extension(state): Extension<AppState>,
    Json(payload): Json<TokenRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    let auth_service = AuthService::new(state.users, state.tokens, state.issuer);

    match auth_service.logout(payload.token.as_deref()).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(error) => Err(service_error_to_http(error)),
    }
}
