//! Middleware for protecting authenticated routes.
//!
//! Validates the bearer access token on protected endpoints. A missing or
//! non-bearer Authorization header is 401; a token that fails verification
//! (expired, bad signature, malformed) is 403.

use crate::state::AppState;
use axum::{
    extract::Request,
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

/// Bearer access-token authentication middleware
pub async fn jwt_auth(mut request: Request, next: Next) -> Result<Response, StatusCode> {
    let state = request
        .extensions()
        .get::<AppState>()
        .cloned()
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if !auth_header.starts_with("Bearer ") {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let token = &auth_header[7..];

    match state.issuer.verify_access(token) {
        Ok(claims) => {
            // Make the identity claim available to the handlers
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(err) => {
            tracing::debug!(%err, "rejected access token");
            Err(StatusCode::FORBIDDEN)
        }
    }
}
