//! Administrative cache-invalidation endpoints.

use crate::state::AppState;
use axum::{
    Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::Json,
    routing::delete,
};
use serde_json::{Value, json};

/// DELETE /cache/{key}: 404 if the key was not cached.
#[axum::debug_handler]
pub async fn delete_cache_key(
    Extension(state): Extension<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Value>, (StatusCode, String)> {
    if state.cache.delete(&key).await {
        tracing::info!(key, "cache entry deleted");
        Ok(Json(json!({ "message": format!("Deleted cache entry {}", key) })))
    } else {
        Err((StatusCode::NOT_FOUND, "Cache entry not found".to_string()))
    }
}

/// DELETE /cache: drop every cached entry.
#[axum::debug_handler]
pub async fn clear_cache(Extension(state): Extension<AppState>) -> Json<Value> {
    state.cache.clear().await;
    tracing::info!("cache cleared");
    Json(json!({ "message": "Cache cleared" }))
}

pub fn cache_router() -> Router {
    Router::new()
        .route("/cache/{key}", delete(delete_cache_key))
        .route("/cache", delete(clear_cache))
}
