//! LibBuddy backend library.
//!
//! A book-discovery JSON API: password authentication with short-lived access
//! tokens and store-backed refresh tokens, a per-user reading list, and
//! cached proxies over the Open Library and NYT book APIs.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod database;
pub mod errors;
pub mod repositories;
pub mod state;
pub mod utils;

use crate::api::common::ApiResponse;
use axum::{Extension, Router, response::Json, routing::get};
use state::AppState;

/// Builds the full application router over the given state.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .merge(auth::routes::auth_router())
        .merge(api::reading_list::routes::reading_list_router())
        .merge(api::cache_admin::cache_router())
        .nest("/api", api::books::routes::books_router())
        .layer(Extension(state))
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "LibBuddy Backend",
            "version": "0.1.0"
        }),
        "Welcome to the LibBuddy API",
    ))
}
