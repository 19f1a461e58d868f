//! Defines the HTTP routes specifically for authentication.
//!
//! Registration, login, access-token renewal, and logout. These are designed
//! to be merged into the main Axum router.

use crate::auth::handlers::*;
use axum::{
    Router,
    routing::{delete, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/token", post(renew_token))
        .route("/logout", delete(logout))
}
