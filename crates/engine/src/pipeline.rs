//! Action recording pipeline
//!
//! Intake -> rules -> ledger -> level -> badges -> challenges. The steps
//! after the ledger update are separate statements; a late failure is
//! logged and the ledger update stands (gamification state is eventually
//! consistent, never rolled back).

use chrono::{TimeZone, Utc};
use common::models::Profile;
use serde::Serialize;
use sqlx::PgPool;
use tracing::{debug, info, warn};

use crate::badges::BadgeEvaluator;
use crate::challenges::ChallengeTracker;
use crate::levels;
use crate::rules;
use crate::streaks;

/// What one recorded action did to the profile
#[derive(Debug, Clone, Serialize)]
pub struct ActionOutcome {
    /// False for action types the rules table does not know
    pub recognized: bool,
    /// False when the daily cap swallowed the reward
    pub rewarded: bool,
    pub points: i32,
    pub xp: i32,
    pub level: i32,
    pub level_up: bool,
    pub unlocked_badges: Vec<String>,
    pub completed_challenges: Vec<String>,
}

impl ActionOutcome {
    fn no_op(recognized: bool, level: i32) -> Self {
        Self {
            recognized,
            rewarded: false,
            points: 0,
            xp: 0,
            level,
            level_up: false,
            unlocked_badges: Vec::new(),
            completed_challenges: Vec::new(),
        }
    }
}

/// Records actions and applies their gamification effects
pub struct ActionPipeline {
    pool: PgPool,
    badge_evaluator: BadgeEvaluator,
    challenge_tracker: ChallengeTracker,
}

impl ActionPipeline {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: pool.clone(),
            badge_evaluator: BadgeEvaluator::new(pool.clone()),
            challenge_tracker: ChallengeTracker::new(pool),
        }
    }

    /// Record an action for a profile and return what it changed
    pub async fn record(
        &self,
        profile: &Profile,
        action_type: &str,
        metadata: serde_json::Value,
    ) -> Result<ActionOutcome, common::Error> {
        let Some(rule) = rules::rule_for(action_type) else {
            // Unknown types are observed as no-ops rather than rejected
            debug!("Ignoring unknown action type: {}", action_type);
            return Ok(ActionOutcome::no_op(false, profile.level));
        };

        let now = Utc::now();
        let today = now.date_naive();

        if let Some(cap) = rule.daily_cap {
            let day_start = Utc.from_utc_datetime(&today.and_time(chrono::NaiveTime::MIN));
            let rewarded_today = db::actions::count_rewarded_since(
                &self.pool,
                profile.id,
                action_type,
                day_start,
            )
            .await
            .map_err(|e| common::Error::Database(e.to_string()))?;

            if rewarded_today >= cap {
                // Observed but not rewarded: keep the audit trail, skip the ledger
                db::actions::insert(
                    &self.pool,
                    profile.id,
                    action_type,
                    0,
                    0,
                    false,
                    metadata,
                )
                .await
                .map_err(|e| common::Error::Database(e.to_string()))?;

                debug!(
                    "Daily cap reached for {} on profile {}",
                    action_type, profile.username
                );
                return Ok(ActionOutcome::no_op(true, profile.level));
            }
        }

        db::actions::insert(
            &self.pool,
            profile.id,
            action_type,
            rule.points,
            rule.xp,
            true,
            metadata,
        )
        .await
        .map_err(|e| common::Error::Database(e.to_string()))?;

        let streak = streaks::next_streak(profile.last_action_on, today, profile.current_streak);
        let mut updated = db::profiles::apply_action_delta(
            &self.pool,
            profile.id,
            rule.points,
            rule.xp,
            streak,
            today,
        )
        .await
        .map_err(|e| common::Error::Database(e.to_string()))?;

        let level = levels::resolve_level(updated.xp_total);
        let level_up = level > profile.level;
        if level != updated.level {
            db::profiles::set_level(&self.pool, profile.id, level)
                .await
                .map_err(|e| common::Error::Database(e.to_string()))?;
            updated.level = level;
        }
        if level_up {
            info!("{} reached level {}", updated.username, level);
        }

        // Badge and challenge updates ride behind the ledger; failures here
        // leave the totals as written and are reported in the logs only.
        let unlocked_badges = match self.badge_evaluator.evaluate(&updated, now).await {
            Ok(unlocked) => unlocked,
            Err(e) => {
                warn!("Badge evaluation failed after ledger update: {}", e);
                Vec::new()
            }
        };

        let completed_challenges = match self
            .challenge_tracker
            .apply(updated.id, action_type, now)
            .await
        {
            Ok(completed) => completed,
            Err(e) => {
                warn!("Challenge update failed after ledger update: {}", e);
                Vec::new()
            }
        };

        Ok(ActionOutcome {
            recognized: true,
            rewarded: true,
            points: rule.points,
            xp: rule.xp,
            level,
            level_up,
            unlocked_badges,
            completed_challenges,
        })
    }
}
