//! Reading list queries

use chrono::{DateTime, Utc};
use common::models::{ReadingList, ReadingListItem};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

fn list_from_row(row: &PgRow) -> ReadingList {
    ReadingList {
        id: row.get("id"),
        profile_id: row.get("profile_id"),
        title: row.get("title"),
        description: row.get("description"),
        is_public: row.get("is_public"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn item_from_row(row: &PgRow) -> ReadingListItem {
    ReadingListItem {
        id: row.get("id"),
        list_id: row.get("list_id"),
        post_id: row.get("post_id"),
        position: row.get("position"),
        added_at: row.get("added_at"),
    }
}

/// Create a reading list
pub async fn create(
    pool: &PgPool,
    profile_id: Uuid,
    title: &str,
    description: Option<&str>,
    is_public: bool,
) -> Result<ReadingList, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO reading_lists (id, profile_id, title, description, is_public, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
        RETURNING id, profile_id, title, description, is_public, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(profile_id)
    .bind(title)
    .bind(description)
    .bind(is_public)
    .fetch_one(pool)
    .await?;

    Ok(list_from_row(&row))
}

/// Get a list by ID
pub async fn get(pool: &PgPool, id: Uuid) -> Result<Option<ReadingList>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, profile_id, title, description, is_public, created_at, updated_at
        FROM reading_lists WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| list_from_row(&r)))
}

/// Page through a profile's lists, newest first
pub async fn page_for_profile(
    pool: &PgPool,
    profile_id: Uuid,
    before: Option<DateTime<Utc>>,
    limit: i64,
) -> Result<Vec<ReadingList>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, profile_id, title, description, is_public, created_at, updated_at
        FROM reading_lists
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

    Ok(rows.iter().map(list_from_row).collect())
}

/// Update list fields; None leaves a field unchanged
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    title: Option<&str>,
    description: Option<&str>,
    is_public: Option<bool>,
) -> Result<ReadingList, sqlx::Error> {
    let row = sqlx::query(
        r#"
        UPDATE reading_lists
        SET title = COALESCE($2, title),
            description = COALESCE($3, description),
            is_public = COALESCE($4, is_public),
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, profile_id, title, description, is_public, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(description)
    .bind(is_public)
    .fetch_one(pool)
    .await?;

    Ok(list_from_row(&row))
}

/// Delete a list (items cascade); true when a row was removed
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM reading_lists WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() == 1)
}

/// Append a post to a list. The (list_id, post_id) constraint raises 23505
/// when the post is already in the list.
pub async fn add_item(
    pool: &PgPool,
    list_id: Uuid,
    post_id: Uuid,
) -> Result<ReadingListItem, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO reading_list_items (id, list_id, post_id, position, added_at)
        VALUES ($1, $2, $3,
                (SELECT COALESCE(MAX(position) + 1, 0) FROM reading_list_items WHERE list_id = $2),
                NOW())
        RETURNING id, list_id, post_id, position, added_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(list_id)
    .bind(post_id)
    .fetch_one(pool)
    .await?;

    Ok(item_from_row(&row))
}

/// Remove an item from a list; true when a row was removed
pub async fn remove_item(pool: &PgPool, list_id: Uuid, item_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM reading_list_items WHERE id = $1 AND list_id = $2")
        .bind(item_id)
        .bind(list_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() == 1)
}

/// Page through a list's items by position
pub async fn items_page(
    pool: &PgPool,
    list_id: Uuid,
    after_position: Option<i32>,
    limit: i64,
) -> Result<Vec<ReadingListItem>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, list_id, post_id, position, added_at
        FROM reading_list_items
        WHERE list_id = $1 AND ($2::int IS NULL OR position > $2)
        ORDER BY position ASC
        LIMIT $3
        "#,
    )
    .bind(list_id)
    .bind(after_position)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(item_from_row).collect())
}
