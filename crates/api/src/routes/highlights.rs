//! Highlight routes

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth;
use crate::error::{ApiError, ApiResult, DbResultExt, FieldError};
use crate::pagination::{page_of, CursorQuery, Page};
use crate::state::AppState;
use common::models::Highlight;

const MAX_CONTENT_CHARS: usize = 2_000;

#[derive(Deserialize)]
pub struct CreateHighlightBody {
    pub post_id: Uuid,
    pub content: String,
    pub color: Option<String>,
    pub note: Option<String>,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<CursorQuery>,
) -> ApiResult<Json<Page<Highlight>>> {
    let profile = auth::require_profile(&state, &headers).await?;

    let limit = query.limit();
    let highlights = db::highlights::page(&state.pool, profile.id, query.cursor, limit)
        .await
        .db_err()?;

    Ok(Json(page_of(highlights, limit, |h| h.created_at)))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateHighlightBody>,
) -> ApiResult<(StatusCode, Json<Highlight>)> {
    let profile = auth::require_profile(&state, &headers).await?;

    let content = body.content.trim();
    if content.is_empty() {
        return Err(ApiError::Validation(vec![FieldError::new(
            "content",
            "must be a non-empty string",
        )]));
    }
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(ApiError::Validation(vec![FieldError::new(
            "content",
            "must be at most 2000 characters",
        )]));
    }

    let highlight = db::highlights::insert(
        &state.pool,
        profile.id,
        body.post_id,
        content,
        body.color.as_deref(),
        body.note.as_deref(),
    )
    .await
    .db_err()?;

    Ok((StatusCode::CREATED, Json(highlight)))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let profile = auth::require_profile(&state, &headers).await?;

    let removed = db::highlights::delete(&state.pool, profile.id, id)
        .await
        .db_err()?;
    if !removed {
        return Err(ApiError::NotFound("Highlight not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
