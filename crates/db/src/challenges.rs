//! Challenge catalog and progress queries

use chrono::{DateTime, Utc};
use common::models::{Challenge, ChallengeCadence, ChallengeProgress, ChallengeStatus};
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

fn challenge_from_row(row: &PgRow) -> Challenge {
    Challenge {
        id: row.get("id"),
        slug: row.get("slug"),
        title: row.get("title"),
        description: row.get("description"),
        cadence: ChallengeCadence::parse(row.get::<String, _>("cadence").as_str()),
        action_type: row.get("action_type"),
        target: row.get("target"),
        reward_points: row.get("reward_points"),
        reward_xp: row.get("reward_xp"),
        starts_at: row.get("starts_at"),
        ends_at: row.get("ends_at"),
    }
}

fn progress_from_row(row: &PgRow) -> ChallengeProgress {
    ChallengeProgress {
        challenge_id: row.get("challenge_id"),
        profile_id: row.get("profile_id"),
        progress: row.get("progress"),
        status: ChallengeStatus::parse(row.get::<String, _>("status").as_str()),
        completed_at: row.get("completed_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Challenges whose cadence window contains `now`
pub async fn list_active(pool: &PgPool, now: DateTime<Utc>) -> Result<Vec<Challenge>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, slug, title, description, cadence, action_type, target,
               reward_points, reward_xp, starts_at, ends_at
        FROM challenges
        WHERE starts_at <= $1 AND $1 < ends_at
        ORDER BY ends_at ASC
        "#,
    )
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(challenge_from_row).collect())
}

/// Active challenges whose requirement matches an action type
pub async fn list_active_for_action(
    pool: &PgPool,
    action_type: &str,
    now: DateTime<Utc>,
) -> Result<Vec<Challenge>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, slug, title, description, cadence, action_type, target,
               reward_points, reward_xp, starts_at, ends_at
        FROM challenges
        WHERE action_type = $1 AND starts_at <= $2 AND $2 < ends_at
        "#,
    )
    .bind(action_type)
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(challenge_from_row).collect())
}

/// Create the progress row for a (challenge, profile) pair if it is missing.
///
/// The first qualifying action moves the pair straight to in_progress.
pub async fn ensure_progress(
    pool: &PgPool,
    challenge_id: Uuid,
    profile_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO challenge_progress (challenge_id, profile_id, progress, status, updated_at)
        VALUES ($1, $2, 0, 'in_progress', NOW())
        ON CONFLICT (challenge_id, profile_id) DO NOTHING
        "#,
    )
    .bind(challenge_id)
    .bind(profile_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Advance progress by one, bounded by the target.
///
/// Completed rows are skipped by the WHERE clause, so a returned row with
/// status `completed` transitioned on this call and on no other. Returns None
/// once the challenge is already completed.
pub async fn advance(
    pool: &PgPool,
    challenge_id: Uuid,
    profile_id: Uuid,
    target: i32,
) -> Result<Option<ChallengeProgress>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        UPDATE challenge_progress
        SET progress = LEAST(progress + 1, $3),
            status = CASE WHEN progress + 1 >= $3 THEN 'completed' ELSE 'in_progress' END,
            completed_at = CASE WHEN progress + 1 >= $3 THEN NOW() ELSE completed_at END,
            updated_at = NOW()
        WHERE challenge_id = $1 AND profile_id = $2 AND status <> 'completed'
        RETURNING challenge_id, profile_id, progress, status, completed_at, updated_at
        "#,
    )
    .bind(challenge_id)
    .bind(profile_id)
    .bind(target)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| progress_from_row(&r)))
}

/// An active challenge joined with one profile's progress
#[derive(Debug, Clone, Serialize)]
pub struct ChallengeWithProgress {
    pub challenge: Challenge,
    pub progress: i32,
    pub status: ChallengeStatus,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Active challenges with the profile's progress; pairs without a progress
/// row report not_started
pub async fn list_with_progress(
    pool: &PgPool,
    profile_id: Uuid,
    now: DateTime<Utc>,
) -> Result<Vec<ChallengeWithProgress>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT c.id, c.slug, c.title, c.description, c.cadence, c.action_type,
               c.target, c.reward_points, c.reward_xp, c.starts_at, c.ends_at,
               cp.progress as profile_progress, cp.status as profile_status,
               cp.completed_at as profile_completed_at
        FROM challenges c
        LEFT JOIN challenge_progress cp
            ON cp.challenge_id = c.id AND cp.profile_id = $1
        WHERE c.starts_at <= $2 AND $2 < c.ends_at
        ORDER BY c.ends_at ASC
        "#,
    )
    .bind(profile_id)
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|r| ChallengeWithProgress {
            challenge: challenge_from_row(r),
            progress: r.get::<Option<i32>, _>("profile_progress").unwrap_or(0),
            status: r
                .get::<Option<String>, _>("profile_status")
                .map(|s| ChallengeStatus::parse(&s))
                .unwrap_or(ChallengeStatus::NotStarted),
            completed_at: r.get("profile_completed_at"),
        })
        .collect())
}
