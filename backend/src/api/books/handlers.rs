//! Handler functions for the book proxy endpoints.
//!
//! Each route consults the response cache before calling upstream. Detail
//! pages are cached for a day; search, subject, and bestseller payloads churn
//! more and get an hour.

use crate::api::common::service_error_to_http;
use crate::state::AppState;
use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const DETAIL_TTL: Duration = Duration::from_secs(86400);
const LISTING_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
}

/// GET /api/books/search?q=
#[axum::debug_handler]
pub async fn search(
    Extension(state): Extension<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let key = format!("search-{}", params.q);
    let books = state.books.clone();

    state
        .cache
        .get_or_fetch(&key, LISTING_TTL, || async move {
            books.search(&params.q).await
        })
        .await
        .map(Json)
        .map_err(service_error_to_http)
}

/// GET /api/books/works/{id}
#[axum::debug_handler]
pub async fn work(
    Extension(state): Extension<AppState>,
    Path(work_id): Path<String>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let key = format!("works-{}", work_id);
    let books = state.books.clone();

    state
        .cache
        .get_or_fetch(&key, DETAIL_TTL, || async move { books.work(&work_id).await })
        .await
        .map(Json)
        .map_err(service_error_to_http)
}

/// GET /api/authors/{id}
#[axum::debug_handler]
pub async fn author(
    Extension(state): Extension<AppState>,
    Path(author_id): Path<String>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let key = format!("authors-{}", author_id);
    let books = state.books.clone();

    state
        .cache
        .get_or_fetch(&key, DETAIL_TTL, || async move {
            books.author(&author_id).await
        })
        .await
        .map(Json)
        .map_err(service_error_to_http)
}

/// GET /api/subjects/{subject}
#[axum::debug_handler]
pub async fn subject(
    Extension(state): Extension<AppState>,
    Path(subject): Path<String>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let key = format!("subjects-{}", subject);
    let books = state.books.clone();

    state
        .cache
        .get_or_fetch(&key, LISTING_TTL, || async move {
            books.subject(&subject).await
        })
        .await
        .map(Json)
        .map_err(service_error_to_http)
}

/// GET /api/bestsellers
#[axum::debug_handler]
pub async fn bestsellers(
    Extension(state): Extension<AppState>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let books = state.books.clone();

    state
        .cache
        .get_or_fetch("bestsellers", LISTING_TTL, || async move {
            books.bestsellers().await
        })
        .await
        .map(Json)
        .map_err(service_error_to_http)
}
