//! Profile routes

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{header::CONTENT_TYPE, HeaderMap};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

use crate::auth;
use crate::error::{ApiError, ApiResult, DbResultExt, FieldError, OptionExt};
use crate::pagination::{page_of, CursorQuery, Page};
use crate::state::AppState;
use common::models::{ActionRecord, Profile, ProfileBadge};
use db::challenges::ChallengeWithProgress;

const MAX_AVATAR_BYTES: usize = 2 * 1024 * 1024;

/// Look up a profile, honoring its visibility setting
async fn visible_profile(
    state: &AppState,
    headers: &HeaderMap,
    username: &str,
) -> ApiResult<Profile> {
    let profile = db::profiles::get_by_username(&state.pool, username)
        .await
        .db_err()?
        .not_found(format!("Profile '{}' not found", username))?;

    if !profile.settings.public_profile {
        let viewer = auth::maybe_profile(state, headers).await?;
        if viewer.map(|v| v.id) != Some(profile.id) {
            return Err(ApiError::NotFound(format!(
                "Profile '{}' not found",
                username
            )));
        }
    }

    Ok(profile)
}

/// The caller's own profile
pub async fn me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Profile>> {
    let profile = auth::require_profile(&state, &headers).await?;
    Ok(Json(profile))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(username): Path<String>,
) -> ApiResult<Json<Profile>> {
    let profile = visible_profile(&state, &headers, &username).await?;
    Ok(Json(profile))
}

/// Recognized settings fields; anything else in the payload is ignored
#[derive(Deserialize)]
pub struct SettingsPatch {
    pub public_profile: Option<bool>,
    pub email_notifications: Option<bool>,
    pub streak_reminders: Option<bool>,
}

pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(patch): Json<SettingsPatch>,
) -> ApiResult<Json<Profile>> {
    let profile = auth::require_profile(&state, &headers).await?;

    let mut settings = profile.settings.clone();
    if let Some(v) = patch.public_profile {
        settings.public_profile = v;
    }
    if let Some(v) = patch.email_notifications {
        settings.email_notifications = v;
    }
    if let Some(v) = patch.streak_reminders {
        settings.streak_reminders = v;
    }

    let updated = db::profiles::update_settings(&state.pool, profile.id, &settings)
        .await
        .db_err()?;

    Ok(Json(updated))
}

/// Upload an avatar image to object storage and point the profile at it
pub async fn upload_avatar(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<Profile>> {
    let profile = auth::require_profile(&state, &headers).await?;

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if !content_type.starts_with("image/") {
        return Err(ApiError::Validation(vec![FieldError::new(
            "body",
            "avatar must be an image",
        )]));
    }
    if body.is_empty() || body.len() > MAX_AVATAR_BYTES {
        return Err(ApiError::Validation(vec![FieldError::new(
            "body",
            "avatar must be between 1 byte and 2 MiB",
        )]));
    }

    let bucket = &state.config.avatar_bucket;
    let path = format!("{}/avatar", profile.id);
    state
        .platform
        .upload(bucket, &path, body.to_vec(), &content_type)
        .await?;

    let url = state.platform.public_url(bucket, &path);
    let updated = db::profiles::set_avatar_url(&state.pool, profile.id, &url)
        .await
        .db_err()?;

    Ok(Json(updated))
}

pub async fn badges(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(username): Path<String>,
) -> ApiResult<Json<Vec<ProfileBadge>>> {
    let profile = visible_profile(&state, &headers, &username).await?;

    let badges = db::badges::list_for_profile(&state.pool, profile.id)
        .await
        .db_err()?;

    Ok(Json(badges))
}

pub async fn challenges(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(username): Path<String>,
) -> ApiResult<Json<Vec<ChallengeWithProgress>>> {
    let profile = visible_profile(&state, &headers, &username).await?;

    let challenges =
        db::challenges::list_with_progress(&state.pool, profile.id, chrono::Utc::now())
            .await
            .db_err()?;

    Ok(Json(challenges))
}

pub async fn activity(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(username): Path<String>,
    Query(query): Query<CursorQuery>,
) -> ApiResult<Json<Page<ActionRecord>>> {
    let profile = visible_profile(&state, &headers, &username).await?;

    let limit = query.limit();
    let records = db::actions::page_for_profile(&state.pool, profile.id, query.cursor, limit)
        .await
        .db_err()?;

    Ok(Json(page_of(records, limit, |r| r.created_at)))
}
