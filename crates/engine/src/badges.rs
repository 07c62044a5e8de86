//! Badge unlock evaluation

use chrono::{DateTime, Utc};
use common::models::{Badge, BadgeRequirement, Profile};
use sqlx::PgPool;
use tracing::info;

/// Whether a requirement can be decided from the profile row alone.
///
/// Returns None for predicates that need the action log.
pub fn profile_satisfies(requirement: &BadgeRequirement, profile: &Profile) -> Option<bool> {
    match requirement {
        BadgeRequirement::XpTotal { threshold } => Some(profile.xp_total >= *threshold),
        BadgeRequirement::StreakDays { threshold } => {
            Some(profile.current_streak >= *threshold)
        }
        BadgeRequirement::ActionCount { .. } => None,
    }
}

/// Checks unlock predicates and awards badges
pub struct BadgeEvaluator {
    pool: PgPool,
}

impl BadgeEvaluator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Evaluate every active, unowned badge against the updated profile.
    ///
    /// Awards go through an insert the (profile, badge) primary key makes
    /// idempotent, so a concurrent duplicate evaluation cannot double-award.
    pub async fn evaluate(
        &self,
        profile: &Profile,
        now: DateTime<Utc>,
    ) -> Result<Vec<String>, common::Error> {
        let catalog = db::badges::list_catalog(&self.pool)
            .await
            .map_err(|e| common::Error::Database(e.to_string()))?;
        let owned = db::badges::owned_ids(&self.pool, profile.id)
            .await
            .map_err(|e| common::Error::Database(e.to_string()))?;

        let mut unlocked = Vec::new();
        for badge in catalog {
            if !badge.is_active(now) || owned.contains(&badge.id) {
                continue;
            }
            if self.requirement_met(&badge, profile).await? {
                let inserted = db::badges::award(&self.pool, profile.id, &badge.id)
                    .await
                    .map_err(|e| common::Error::Database(e.to_string()))?;
                if inserted {
                    info!("Badge unlocked: {} for {}", badge.id, profile.username);
                    unlocked.push(badge.id);
                }
            }
        }

        Ok(unlocked)
    }

    async fn requirement_met(
        &self,
        badge: &Badge,
        profile: &Profile,
    ) -> Result<bool, common::Error> {
        if let Some(met) = profile_satisfies(&badge.requirement, profile) {
            return Ok(met);
        }

        match &badge.requirement {
            BadgeRequirement::ActionCount {
                action_type,
                threshold,
            } => {
                let count =
                    db::actions::count_rewarded_total(&self.pool, profile.id, action_type)
                        .await
                        .map_err(|e| common::Error::Database(e.to_string()))?;
                Ok(count >= *threshold)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::models::ProfileSettings;
    use uuid::Uuid;

    fn make_profile(xp_total: i64, current_streak: i32) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            auth_user_id: Uuid::new_v4(),
            username: "tester".to_string(),
            display_name: None,
            avatar_url: None,
            xp_total,
            points_total: xp_total,
            level: 1,
            current_streak,
            longest_streak: current_streak,
            last_action_on: None,
            settings: ProfileSettings::default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_xp_requirement_met_at_threshold() {
        let req = BadgeRequirement::XpTotal { threshold: 100 };
        assert_eq!(profile_satisfies(&req, &make_profile(100, 0)), Some(true));
        assert_eq!(profile_satisfies(&req, &make_profile(99, 0)), Some(false));
    }

    #[test]
    fn test_streak_requirement() {
        let req = BadgeRequirement::StreakDays { threshold: 7 };
        assert_eq!(profile_satisfies(&req, &make_profile(0, 7)), Some(true));
        assert_eq!(profile_satisfies(&req, &make_profile(0, 6)), Some(false));
    }

    #[test]
    fn test_action_count_needs_the_log() {
        let req = BadgeRequirement::ActionCount {
            action_type: "post_published".to_string(),
            threshold: 10,
        };
        assert_eq!(profile_satisfies(&req, &make_profile(9999, 99)), None);
    }

    #[test]
    fn test_window_gating() {
        let badge = Badge {
            id: "seasonal".to_string(),
            name: "Seasonal".to_string(),
            description: String::new(),
            icon: "leaf".to_string(),
            rarity: common::models::BadgeRarity::Rare,
            requirement: BadgeRequirement::XpTotal { threshold: 0 },
            starts_at: Some(Utc::now() + chrono::Duration::days(1)),
            ends_at: None,
        };
        assert!(!badge.is_active(Utc::now()));
        assert!(badge.is_active(Utc::now() + chrono::Duration::days(2)));
    }
}
