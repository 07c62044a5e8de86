//! Challenge routes

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use std::sync::Arc;

use crate::error::{ApiResult, DbResultExt};
use crate::state::AppState;
use common::models::Challenge;

/// List currently active challenges
pub async fn list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Challenge>>> {
    let challenges = db::challenges::list_active(&state.pool, Utc::now())
        .await
        .db_err()?;

    Ok(Json(challenges))
}
