//! Defines the HTTP routes for the reading list.
//!
//! Every route requires a valid bearer access token.

use super::handlers::{add_to_reading_list, get_reading_list, remove_from_reading_list};
use crate::auth::middleware::jwt_auth;
use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

pub fn reading_list_router() -> Router {
    Router::new()
        .route(
            "/add-to-reading-list",
            post(add_to_reading_list).layer(middleware::from_fn(jwt_auth)),
        )
        .route(
            "/reading-list",
            get(get_reading_list).layer(middleware::from_fn(jwt_auth)),
        )
        .route(
            "/reading-list/{book_id}",
            delete(remove_from_reading_list).layer(middleware::from_fn(jwt_auth)),
        )
}
