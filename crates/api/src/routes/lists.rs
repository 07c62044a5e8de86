//! Reading list routes

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth;
use crate::error::{ApiError, ApiResult, DbResultExt, FieldError, OptionExt};
use crate::pagination::{page_of, CursorQuery, Page};
use crate::state::AppState;
use common::models::{Profile, ReadingList, ReadingListItem};

#[derive(Deserialize)]
pub struct CreateListBody {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

#[derive(Deserialize)]
pub struct UpdateListBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
}

#[derive(Deserialize)]
pub struct AddItemBody {
    pub post_id: Uuid,
}

/// Query parameters for position-keyed item paging
#[derive(Deserialize)]
pub struct ItemsQuery {
    pub after: Option<i32>,
    pub limit: Option<i64>,
}

fn validate_title(title: &str) -> ApiResult<&str> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ApiError::Validation(vec![FieldError::new(
            "title",
            "must be a non-empty string",
        )]));
    }
    Ok(title)
}

/// Fetch a list the caller is allowed to read
async fn readable_list(
    state: &AppState,
    caller: Option<&Profile>,
    list_id: Uuid,
) -> ApiResult<ReadingList> {
    let list = db::lists::get(&state.pool, list_id)
        .await
        .db_err()?
        .not_found("List not found")?;

    if !list.is_public && caller.map(|p| p.id) != Some(list.profile_id) {
        return Err(ApiError::NotFound("List not found".to_string()));
    }

    Ok(list)
}

/// Fetch a list only if the caller owns it
async fn owned_list(state: &AppState, caller: &Profile, list_id: Uuid) -> ApiResult<ReadingList> {
    let list = db::lists::get(&state.pool, list_id)
        .await
        .db_err()?
        .not_found("List not found")?;

    if list.profile_id != caller.id {
        return Err(ApiError::Forbidden(
            "List belongs to another profile".to_string(),
        ));
    }

    Ok(list)
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<CursorQuery>,
) -> ApiResult<Json<Page<ReadingList>>> {
    let profile = auth::require_profile(&state, &headers).await?;

    let limit = query.limit();
    let lists = db::lists::page_for_profile(&state.pool, profile.id, query.cursor, limit)
        .await
        .db_err()?;

    Ok(Json(page_of(lists, limit, |l| l.created_at)))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateListBody>,
) -> ApiResult<(StatusCode, Json<ReadingList>)> {
    let profile = auth::require_profile(&state, &headers).await?;
    let title = validate_title(&body.title)?;

    let list = db::lists::create(
        &state.pool,
        profile.id,
        title,
        body.description.as_deref(),
        body.is_public,
    )
    .await
    .db_err()?;

    Ok((StatusCode::CREATED, Json(list)))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ReadingList>> {
    let caller = auth::maybe_profile(&state, &headers).await?;
    let list = readable_list(&state, caller.as_ref(), id).await?;
    Ok(Json(list))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateListBody>,
) -> ApiResult<Json<ReadingList>> {
    let profile = auth::require_profile(&state, &headers).await?;
    owned_list(&state, &profile, id).await?;

    let title = match &body.title {
        Some(t) => Some(validate_title(t)?),
        None => None,
    };

    let updated = db::lists::update(
        &state.pool,
        id,
        title,
        body.description.as_deref(),
        body.is_public,
    )
    .await
    .db_err()?;

    Ok(Json(updated))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let profile = auth::require_profile(&state, &headers).await?;
    owned_list(&state, &profile, id).await?;

    db::lists::delete(&state.pool, id).await.db_err()?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn items(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Query(query): Query<ItemsQuery>,
) -> ApiResult<Json<Vec<ReadingListItem>>> {
    let caller = auth::maybe_profile(&state, &headers).await?;
    readable_list(&state, caller.as_ref(), id).await?;

    let limit = query.limit.unwrap_or(50).clamp(1, 100);
    let items = db::lists::items_page(&state.pool, id, query.after, limit)
        .await
        .db_err()?;

    Ok(Json(items))
}

pub async fn add_item(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(body): Json<AddItemBody>,
) -> ApiResult<(StatusCode, Json<ReadingListItem>)> {
    let profile = auth::require_profile(&state, &headers).await?;
    owned_list(&state, &profile, id).await?;

    let item = db::lists::add_item(&state.pool, id, body.post_id)
        .await
        .db_conflict("Post is already in this list")?;

    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn remove_item(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    let profile = auth::require_profile(&state, &headers).await?;
    owned_list(&state, &profile, id).await?;

    let removed = db::lists::remove_item(&state.pool, id, item_id)
        .await
        .db_err()?;
    if !removed {
        return Err(ApiError::NotFound("List item not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
