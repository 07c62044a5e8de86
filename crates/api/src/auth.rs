//! Session resolution
//!
//! The auth provider signs session tokens; handlers resolve them to a
//! profile row here. Profiles are created lazily on the first
//! authenticated request, keyed by the auth identity.

use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::HeaderMap;
use chrono::Utc;
use common::models::Profile;

use crate::error::{ApiError, ApiResult, DbResultExt};
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "sips_session";

/// Pull the session token from the cookie or an Authorization bearer header
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(cookies) = headers.get(COOKIE).and_then(|v| v.to_str().ok()) {
        for cookie in cookies.split(';') {
            if let Some(value) = cookie.trim().strip_prefix(SESSION_COOKIE) {
                if let Some(token) = value.strip_prefix('=') {
                    return Some(token.to_string());
                }
            }
        }
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

/// Resolve the caller's profile, or None without a valid session
pub async fn maybe_profile(
    state: &AppState,
    headers: &HeaderMap,
) -> ApiResult<Option<Profile>> {
    let Some(token) = session_token(headers) else {
        return Ok(None);
    };
    let Some(claims) =
        platform::verify_session_token(&token, &state.config.session_secret, Utc::now())
    else {
        return Ok(None);
    };

    if let Some(profile) = db::profiles::get_by_auth_user(&state.pool, claims.auth_user_id)
        .await
        .db_err()?
    {
        return Ok(Some(profile));
    }

    // First authenticated request: create the profile with a placeholder
    // username the user can change later
    let fallback = format!(
        "user-{}",
        &claims.auth_user_id.simple().to_string()[..8]
    );
    let profile = db::profiles::upsert(&state.pool, claims.auth_user_id, &fallback)
        .await
        .db_err()?;

    Ok(Some(profile))
}

/// Resolve the caller's profile or reject with 401
pub async fn require_profile(state: &AppState, headers: &HeaderMap) -> ApiResult<Profile> {
    maybe_profile(state, headers)
        .await?
        .ok_or(ApiError::Unauthorized)
}
