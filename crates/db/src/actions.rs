//! Action record queries
//!
//! The action log is append-only; rows are never updated or deleted.

use chrono::{DateTime, Utc};
use common::models::ActionRecord;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

fn from_row(row: &PgRow) -> ActionRecord {
    ActionRecord {
        id: row.get("id"),
        profile_id: row.get("profile_id"),
        action_type: row.get("action_type"),
        points: row.get("points"),
        xp: row.get("xp"),
        rewarded: row.get("rewarded"),
        metadata: row.get("metadata"),
        created_at: row.get("created_at"),
    }
}

/// Append an action record
pub async fn insert(
    pool: &PgPool,
    profile_id: Uuid,
    action_type: &str,
    points: i32,
    xp: i32,
    rewarded: bool,
    metadata: serde_json::Value,
) -> Result<ActionRecord, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO action_records (id, profile_id, action_type, points, xp, rewarded, metadata, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
        RETURNING id, profile_id, action_type, points, xp, rewarded, metadata, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(profile_id)
    .bind(action_type)
    .bind(points)
    .bind(xp)
    .bind(rewarded)
    .bind(metadata)
    .fetch_one(pool)
    .await?;

    Ok(from_row(&row))
}

/// Count rewarded actions of a type since a point in time (daily-cap check)
pub async fn count_rewarded_since(
    pool: &PgPool,
    profile_id: Uuid,
    action_type: &str,
    since: DateTime<Utc>,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT COUNT(*) as count
        FROM action_records
        WHERE profile_id = $1 AND action_type = $2 AND rewarded AND created_at >= $3
        "#,
    )
    .bind(profile_id)
    .bind(action_type)
    .bind(since)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<i64, _>("count"))
}

/// All-time rewarded count for a type (badge action-count predicates)
pub async fn count_rewarded_total(
    pool: &PgPool,
    profile_id: Uuid,
    action_type: &str,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT COUNT(*) as count
        FROM action_records
        WHERE profile_id = $1 AND action_type = $2 AND rewarded
        "#,
    )
    .bind(profile_id)
    .bind(action_type)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Page through a profile's action log, newest first
pub async fn page_for_profile(
    pool: &PgPool,
    profile_id: Uuid,
    before: Option<DateTime<Utc>>,
    limit: i64,
) -> Result<Vec<ActionRecord>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, profile_id, action_type, points, xp, rewarded, metadata, created_at
        FROM action_records
        WHERE profile_id = $1 AND ($2::timestamptz IS NULL OR created_at < $2)
        ORDER BY created_at DESC
        LIMIT $3
        "#,
    )
    .bind(profile_id)
    .bind(before)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(from_row).collect())
}
