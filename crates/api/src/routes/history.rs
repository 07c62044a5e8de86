//! Reading history routes

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth;
use crate::error::{ApiError, ApiResult, DbResultExt, FieldError};
use crate::pagination::{page_of, CursorQuery, Page};
use crate::state::AppState;
use common::models::ReadingHistoryEntry;

#[derive(Deserialize)]
pub struct UpsertHistoryBody {
    pub post_id: Uuid,
    #[serde(default)]
    pub progress_percent: i32,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<CursorQuery>,
) -> ApiResult<Json<Page<ReadingHistoryEntry>>> {
    let profile = auth::require_profile(&state, &headers).await?;

    let limit = query.limit();
    let entries = db::history::page(&state.pool, profile.id, query.cursor, limit)
        .await
        .db_err()?;

    Ok(Json(page_of(entries, limit, |e| e.last_read_at)))
}

/// Record or refresh the reading position for a post
pub async fn upsert(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<UpsertHistoryBody>,
) -> ApiResult<Json<ReadingHistoryEntry>> {
    let profile = auth::require_profile(&state, &headers).await?;

    if !(0..=100).contains(&body.progress_percent) {
        return Err(ApiError::Validation(vec![FieldError::new(
            "progress_percent",
            "must be between 0 and 100",
        )]));
    }

    let entry = db::history::upsert(&state.pool, profile.id, body.post_id, body.progress_percent)
        .await
        .db_err()?;

    Ok(Json(entry))
}

/// Clear the caller's entire reading history
pub async fn clear(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let profile = auth::require_profile(&state, &headers).await?;

    db::history::clear(&state.pool, profile.id).await.db_err()?;

    Ok(StatusCode::NO_CONTENT)
}
