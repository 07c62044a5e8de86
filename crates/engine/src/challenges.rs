//! Challenge progress tracking

use chrono::{DateTime, Utc};
use common::models::ChallengeStatus;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::levels;

/// Advances challenge progress as qualifying actions arrive
pub struct ChallengeTracker {
    pool: PgPool,
}

impl ChallengeTracker {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Advance every active challenge matching the action type.
    ///
    /// Progress is bounded by the target and the completed transition fires
    /// exactly once; completion pays the reward through the normal ledger
    /// update. Returns slugs of challenges completed by this action.
    pub async fn apply(
        &self,
        profile_id: Uuid,
        action_type: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<String>, common::Error> {
        let challenges = db::challenges::list_active_for_action(&self.pool, action_type, now)
            .await
            .map_err(|e| common::Error::Database(e.to_string()))?;

        let mut completed = Vec::new();
        for challenge in challenges {
            db::challenges::ensure_progress(&self.pool, challenge.id, profile_id)
                .await
                .map_err(|e| common::Error::Database(e.to_string()))?;

            let progress =
                db::challenges::advance(&self.pool, challenge.id, profile_id, challenge.target)
                    .await
                    .map_err(|e| common::Error::Database(e.to_string()))?;

            // None = already completed; the action is a no-op for this challenge
            let Some(progress) = progress else {
                continue;
            };

            if progress.status == ChallengeStatus::Completed {
                info!(
                    "Challenge completed: {} by profile {}",
                    challenge.slug, profile_id
                );
                let updated = db::profiles::apply_reward(
                    &self.pool,
                    profile_id,
                    challenge.reward_points,
                    challenge.reward_xp,
                )
                .await
                .map_err(|e| common::Error::Database(e.to_string()))?;

                let level = levels::resolve_level(updated.xp_total);
                if level != updated.level {
                    db::profiles::set_level(&self.pool, profile_id, level)
                        .await
                        .map_err(|e| common::Error::Database(e.to_string()))?;
                }

                completed.push(challenge.slug);
            }
        }

        Ok(completed)
    }
}
