//! Highlight queries

use chrono::{DateTime, Utc};
use common::models::Highlight;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

fn from_row(row: &PgRow) -> Highlight {
    Highlight {
        id: row.get("id"),
        profile_id: row.get("profile_id"),
        post_id: row.get("post_id"),
        content: row.get("content"),
        color: row.get("color"),
        note: row.get("note"),
        created_at: row.get("created_at"),
    }
}

/// Save a highlighted passage
pub async fn insert(
    pool: &PgPool,
    profile_id: Uuid,
    post_id: Uuid,
    content: &str,
    color: Option<&str>,
    note: Option<&str>,
) -> Result<Highlight, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO highlights (id, profile_id, post_id, content, color, note, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, NOW())
        RETURNING id, profile_id, post_id, content, color, note, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(profile_id)
    .bind(post_id)
    .bind(content)
    .bind(color)
    .bind(note)
    .fetch_one(pool)
    .await?;

    Ok(from_row(&row))
}

/// Delete a highlight owned by the profile; true when a row was removed
pub async fn delete(pool: &PgPool, profile_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM highlights WHERE id = $1 AND profile_id = $2")
        .bind(id)
        .bind(profile_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() == 1)
}

/// Page through a profile's highlights, newest first
pub async fn page(
    pool: &PgPool,
    profile_id: Uuid,
    before: Option<DateTime<Utc>>,
    limit: i64,
) -> Result<Vec<Highlight>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, profile_id, post_id, content, color, note, created_at
        FROM highlights
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
