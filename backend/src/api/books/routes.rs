//! Defines the HTTP routes for book discovery.
//!
//! All of these are public, read-only proxy routes over the upstream APIs.

use super::handlers::{author, bestsellers, search, subject, work};
use axum::{Router, routing::get};

pub fn books_router() -> Router {
    Router::new()
        .route("/books/search", get(search))
        .route("/books/works/{id}", get(work))
        .route("/authors/{id}", get(author))
        .route("/subjects/{subject}", get(subject))
        .route("/bestsellers", get(bestsellers))
}
