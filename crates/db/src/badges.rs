//! Badge catalog and award queries

use common::models::{Badge, BadgeRarity, BadgeRequirement, ProfileBadge};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::warn;
use uuid::Uuid;

fn badge_from_row(row: &PgRow) -> Option<Badge> {
    let kind: String = row.get("requirement_kind");
    let threshold: i64 = row.get("requirement_threshold");
    let action_type: Option<String> = row.get("requirement_action_type");

    let requirement = match kind.as_str() {
        "xp_total" => BadgeRequirement::XpTotal { threshold },
        "streak_days" => BadgeRequirement::StreakDays {
            threshold: threshold as i32,
        },
        "action_count" => BadgeRequirement::ActionCount {
            action_type: action_type?,
            threshold,
        },
        other => {
            warn!("Skipping badge with unknown requirement kind: {}", other);
            return None;
        }
    };

    Some(Badge {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        icon: row.get("icon"),
        rarity: BadgeRarity::parse(row.get::<String, _>("rarity").as_str()),
        requirement,
        starts_at: row.get("starts_at"),
        ends_at: row.get("ends_at"),
    })
}

/// Load the full badge catalog
pub async fn list_catalog(pool: &PgPool) -> Result<Vec<Badge>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, description, icon, rarity,
               requirement_kind, requirement_threshold, requirement_action_type,
               starts_at, ends_at
        FROM badges
        ORDER BY requirement_threshold ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().filter_map(badge_from_row).collect())
}

/// Badge IDs a profile already owns
pub async fn owned_ids(pool: &PgPool, profile_id: Uuid) -> Result<Vec<String>, sqlx::Error> {
    let rows = sqlx::query("SELECT badge_id FROM profile_badges WHERE profile_id = $1")
        .bind(profile_id)
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(|r| r.get("badge_id")).collect())
}

/// Award a badge to a profile.
///
/// Returns true only when this call inserted the row. The (profile_id,
/// badge_id) primary key absorbs duplicate awards under concurrent requests.
pub async fn award(
    pool: &PgPool,
    profile_id: Uuid,
    badge_id: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO profile_badges (profile_id, badge_id, earned_at)
        VALUES ($1, $2, NOW())
        ON CONFLICT (profile_id, badge_id) DO NOTHING
        "#,
    )
    .bind(profile_id)
    .bind(badge_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Get all badges a profile has earned, with catalog details
pub async fn list_for_profile(
    pool: &PgPool,
    profile_id: Uuid,
) -> Result<Vec<ProfileBadge>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT pb.profile_id, pb.badge_id, pb.earned_at,
               b.name, b.description, b.icon
        FROM profile_badges pb
        JOIN badges b ON b.id = pb.badge_id
        WHERE pb.profile_id = $1
        ORDER BY pb.earned_at DESC
        "#,
    )
    .bind(profile_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| ProfileBadge {
            profile_id: r.get("profile_id"),
            badge_id: r.get("badge_id"),
            earned_at: r.get("earned_at"),
            name: Some(r.get("name")),
            description: Some(r.get("description")),
            icon: Some(r.get("icon")),
        })
        .collect())
}

/// Count how many profiles have earned a badge
pub async fn count_awards(pool: &PgPool, badge_id: &str) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM profile_badges WHERE badge_id = $1")
        .bind(badge_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}
