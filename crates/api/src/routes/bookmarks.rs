//! Bookmark routes

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth;
use crate::error::{ApiError, ApiResult, DbResultExt};
use crate::pagination::{page_of, CursorQuery, Page};
use crate::state::AppState;
use common::models::Bookmark;

#[derive(Deserialize)]
pub struct CreateBookmarkBody {
    pub post_id: Uuid,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<CursorQuery>,
) -> ApiResult<Json<Page<Bookmark>>> {
    let profile = auth::require_profile(&state, &headers).await?;

    let limit = query.limit();
    let bookmarks = db::bookmarks::page(&state.pool, profile.id, query.cursor, limit)
        .await
        .db_err()?;

    Ok(Json(page_of(bookmarks, limit, |b| b.created_at)))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateBookmarkBody>,
) -> ApiResult<(StatusCode, Json<Bookmark>)> {
    let profile = auth::require_profile(&state, &headers).await?;

    let bookmark = db::bookmarks::insert(&state.pool, profile.id, body.post_id)
        .await
        .db_conflict("Post is already bookmarked")?;

    Ok((StatusCode::CREATED, Json(bookmark)))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let profile = auth::require_profile(&state, &headers).await?;

    let removed = db::bookmarks::delete(&state.pool, profile.id, id)
        .await
        .db_err()?;
    if !removed {
        return Err(ApiError::NotFound("Bookmark not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
