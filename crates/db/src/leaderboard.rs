//! Leaderboard queries

use chrono::{DateTime, Utc};
use common::models::LeaderboardEntry;
use sqlx::{PgPool, Row};

/// Top profiles by XP earned within a period.
///
/// `score` sums xp from the action log for the window; `profiles.xp_total`
/// is all-time and deliberately not used here.
pub async fn top(
    pool: &PgPool,
    since: DateTime<Utc>,
    limit: i64,
) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT p.username, p.display_name, p.avatar_url, p.level,
               COALESCE(SUM(a.xp), 0)::bigint as period_xp
        FROM profiles p
        JOIN action_records a ON a.profile_id = p.id
            AND a.rewarded AND a.created_at >= $1
        GROUP BY p.id
        HAVING COALESCE(SUM(a.xp), 0) > 0
        ORDER BY period_xp DESC, p.username ASC
        LIMIT $2
        "#,
    )
    .bind(since)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .enumerate()
        .map(|(idx, row)| LeaderboardEntry {
            rank: (idx + 1) as i32,
            username: row.get("username"),
            display_name: row.get("display_name"),
            avatar_url: row.get("avatar_url"),
            level: row.get("level"),
            score: row.get("period_xp"),
        })
        .collect())
}
