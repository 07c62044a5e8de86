//! Leaderboard routes

use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{ApiResult, DbResultExt};
use crate::state::AppState;
use common::models::LeaderboardEntry;

#[derive(Deserialize)]
pub struct LeaderboardQuery {
    #[serde(default = "default_period")]
    pub period: String,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_period() -> String {
    "all".to_string()
}

fn default_limit() -> i64 {
    25
}

fn period_to_since(period: &str) -> DateTime<Utc> {
    match period {
        "week" => Utc::now() - Duration::days(7),
        "month" => Utc::now() - Duration::days(30),
        _ => Utc::now() - Duration::days(365 * 10),
    }
}

/// Top profiles by XP earned in the requested period
pub async fn global(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LeaderboardQuery>,
) -> ApiResult<Json<Vec<LeaderboardEntry>>> {
    let since = period_to_since(&query.period);
    let limit = query.limit.clamp(1, 100);

    let entries = db::leaderboard::top(&state.pool, since, limit)
        .await
        .db_err()?;

    Ok(Json(entries))
}
