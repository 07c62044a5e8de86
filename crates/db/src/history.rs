//! Reading history queries

use chrono::{DateTime, Utc};
use common::models::ReadingHistoryEntry;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

fn from_row(row: &PgRow) -> ReadingHistoryEntry {
    ReadingHistoryEntry {
        id: row.get("id"),
        profile_id: row.get("profile_id"),
        post_id: row.get("post_id"),
        progress_percent: row.get("progress_percent"),
        last_read_at: row.get("last_read_at"),
    }
}

/// Record a reading position; one row per (profile, post), last write wins
pub async fn upsert(
    pool: &PgPool,
    profile_id: Uuid,
    post_id: Uuid,
    progress_percent: i32,
) -> Result<ReadingHistoryEntry, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO reading_history (id, profile_id, post_id, progress_percent, last_read_at)
        VALUES ($1, $2, $3, $4, NOW())
        ON CONFLICT (profile_id, post_id) DO UPDATE
        SET progress_percent = EXCLUDED.progress_percent,
            last_read_at = NOW()
        RETURNING id, profile_id, post_id, progress_percent, last_read_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(profile_id)
    .bind(post_id)
    .bind(progress_percent)
    .fetch_one(pool)
    .await?;

    Ok(from_row(&row))
}

/// Page through a profile's history, most recently read first
pub async fn page(
    pool: &PgPool,
    profile_id: Uuid,
    before: Option<DateTime<Utc>>,
    limit: i64,
) -> Result<Vec<ReadingHistoryEntry>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, profile_id, post_id, progress_percent, last_read_at
        FROM reading_history
        WHERE profile_id = $1 AND ($2::timestamptz IS NULL OR last_read_at < $2)
        ORDER BY last_read_at DESC
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

/// Clear a profile's entire reading history; returns rows removed
pub async fn clear(pool: &PgPool, profile_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM reading_history WHERE profile_id = $1")
        .bind(profile_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
