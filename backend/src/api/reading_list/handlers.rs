//! Handler functions for reading-list endpoints.
//!
//! All routes here sit behind the bearer middleware; the authenticated user
//! comes from the access-token claims in the request extensions.

use crate::api::common::{ApiResponse, service_error_to_http};
use crate::state::AppState;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
    response::Json as ResponseJson,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AddToReadingListRequest {
    pub book_id: String,
}

#[derive(Debug, Serialize)]
pub struct ReadingListResponse {
    pub books: Vec<String>,
}

/// POST /add-to-reading-list: 201 on save, 409 when already saved.
#[axum::debug_handler]
pub async fn add_to_reading_list(
    Extension(state): Extension<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<AddToReadingListRequest>,
) -> Result<(StatusCode, ResponseJson<ApiResponse<String>>), (StatusCode, String)> {
    state
        .reading_list
        .add(claims.sub, &payload.book_id)
        .await
        .map_err(service_error_to_http)?;

    tracing::info!(user = claims.sub, book = %payload.book_id, "saved to reading list");
    Ok((
        StatusCode::CREATED,
        ResponseJson(ApiResponse::success(payload.book_id, "Book saved")),
    ))
}

/// GET /reading-list: the caller's saved books.
#[axum::debug_handler]
pub async fn get_reading_list(
    Extension(state): Extension<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<ResponseJson<ReadingListResponse>, (StatusCode, String)> {
    let entries = state
        .reading_list
        .list(claims.sub)
        .await
        .map_err(service_error_to_http)?;

    Ok(ResponseJson(ReadingListResponse {
        books: entries.into_iter().map(|entry| entry.book_id).collect(),
    }))
}

/// DELETE /reading-list/{book_id}: 204 on removal, 404 if not saved.
#[axum::debug_handler]
pub async fn remove_from_reading_list(
    Extension(state): Extension<AppState>,
    Extension(claims): Extension<Claims>,
    Path(book_id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let removed = state
        .reading_list
        .remove(claims.sub, &book_id)
        .await
        .map_err(service_error_to_http)?;

    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "Book not in reading list".to_string()))
    }
}
