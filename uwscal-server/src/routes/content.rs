//! Page content endpoint

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde_json::Value;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/content/{page}", get(get_content))
}

/// GET /api/content/:page - Content blob for one page, passed through as-is
async fn get_content(
    State(state): State<AppState>,
    Path(page): Path<String>,
) -> Result<Json<Value>, AppError> {
    state
        .content
        .page(&page)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found("Content not found for this page."))
}
