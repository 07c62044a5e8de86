//! Profile queries

use chrono::NaiveDate;
use common::models::{Profile, ProfileSettings};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

const PROFILE_COLUMNS: &str = "id, auth_user_id, username, display_name, avatar_url, \
     xp_total, points_total, level, current_streak, longest_streak, last_action_on, \
     settings, created_at, updated_at";

fn from_row(row: &PgRow) -> Profile {
    let settings: serde_json::Value = row.get("settings");
    Profile {
        id: row.get("id"),
        auth_user_id: row.get("auth_user_id"),
        username: row.get("username"),
        display_name: row.get("display_name"),
        avatar_url: row.get("avatar_url"),
        xp_total: row.get("xp_total"),
        points_total: row.get("points_total"),
        level: row.get("level"),
        current_streak: row.get("current_streak"),
        longest_streak: row.get("longest_streak"),
        last_action_on: row.get("last_action_on"),
        settings: serde_json::from_value(settings).unwrap_or_default(),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Get or create the profile for an auth identity
pub async fn upsert(
    pool: &PgPool,
    auth_user_id: Uuid,
    username: &str,
) -> Result<Profile, sqlx::Error> {
    let row = sqlx::query(&format!(
        r#"
        INSERT INTO profiles (id, auth_user_id, username, settings, created_at, updated_at)
        VALUES ($1, $2, $3, $4, NOW(), NOW())
        ON CONFLICT (auth_user_id) DO UPDATE SET updated_at = NOW()
        RETURNING {PROFILE_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(auth_user_id)
    .bind(username)
    .bind(serde_json::to_value(ProfileSettings::default()).unwrap_or_default())
    .fetch_one(pool)
    .await?;

    Ok(from_row(&row))
}

/// Get profile by ID
pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Profile>, sqlx::Error> {
    let row = sqlx::query(&format!(
        "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| from_row(&r)))
}

/// Get profile by the external auth identity
pub async fn get_by_auth_user(
    pool: &PgPool,
    auth_user_id: Uuid,
) -> Result<Option<Profile>, sqlx::Error> {
    let row = sqlx::query(&format!(
        "SELECT {PROFILE_COLUMNS} FROM profiles WHERE auth_user_id = $1"
    ))
    .bind(auth_user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| from_row(&r)))
}

/// Get profile by username
pub async fn get_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<Profile>, sqlx::Error> {
    let row = sqlx::query(&format!(
        "SELECT {PROFILE_COLUMNS} FROM profiles WHERE username = $1"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| from_row(&r)))
}

/// Apply a rewarded action to the profile ledger in a single relative update.
///
/// Totals are incremented; streak columns are written absolutely from values
/// the engine computed off the pre-update row. Last write wins under races.
pub async fn apply_action_delta(
    pool: &PgPool,
    profile_id: Uuid,
    points: i32,
    xp: i32,
    current_streak: i32,
    last_action_on: NaiveDate,
) -> Result<Profile, sqlx::Error> {
    let row = sqlx::query(&format!(
        r#"
        UPDATE profiles
        SET xp_total = xp_total + $2,
            points_total = points_total + $3,
            current_streak = $4,
            longest_streak = GREATEST(longest_streak, $4),
            last_action_on = $5,
            updated_at = NOW()
        WHERE id = $1
        RETURNING {PROFILE_COLUMNS}
        "#
    ))
    .bind(profile_id)
    .bind(xp as i64)
    .bind(points as i64)
    .bind(current_streak)
    .bind(last_action_on)
    .fetch_one(pool)
    .await?;

    Ok(from_row(&row))
}

/// Add challenge reward points/XP without touching the streak
pub async fn apply_reward(
    pool: &PgPool,
    profile_id: Uuid,
    points: i32,
    xp: i32,
) -> Result<Profile, sqlx::Error> {
    let row = sqlx::query(&format!(
        r#"
        UPDATE profiles
        SET xp_total = xp_total + $2,
            points_total = points_total + $3,
            updated_at = NOW()
        WHERE id = $1
        RETURNING {PROFILE_COLUMNS}
        "#
    ))
    .bind(profile_id)
    .bind(xp as i64)
    .bind(points as i64)
    .fetch_one(pool)
    .await?;

    Ok(from_row(&row))
}

/// Store the level derived from cumulative XP
pub async fn set_level(pool: &PgPool, profile_id: Uuid, level: i32) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE profiles SET level = $2, updated_at = NOW() WHERE id = $1")
        .bind(profile_id)
        .bind(level)
        .execute(pool)
        .await?;

    Ok(())
}

/// Replace the profile's settings document
pub async fn update_settings(
    pool: &PgPool,
    profile_id: Uuid,
    settings: &ProfileSettings,
) -> Result<Profile, sqlx::Error> {
    let row = sqlx::query(&format!(
        r#"
        UPDATE profiles SET settings = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING {PROFILE_COLUMNS}
        "#
    ))
    .bind(profile_id)
    .bind(serde_json::to_value(settings).unwrap_or_default())
    .fetch_one(pool)
    .await?;

    Ok(from_row(&row))
}

/// Point the profile at a newly uploaded avatar
pub async fn set_avatar_url(
    pool: &PgPool,
    profile_id: Uuid,
    avatar_url: &str,
) -> Result<Profile, sqlx::Error> {
    let row = sqlx::query(&format!(
        r#"
        UPDATE profiles SET avatar_url = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING {PROFILE_COLUMNS}
        "#
    ))
    .bind(profile_id)
    .bind(avatar_url)
    .fetch_one(pool)
    .await?;

    Ok(from_row(&row))
}
