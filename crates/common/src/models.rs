//! Domain models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reader/author profile, distinct from the auth identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub auth_user_id: Uuid,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub xp_total: i64,
    pub points_total: i64,
    pub level: i32,
    pub current_streak: i32,
    pub longest_streak: i32,
    /// UTC date of the most recent rewarded action, used for streak arithmetic
    pub last_action_on: Option<NaiveDate>,
    pub settings: ProfileSettings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Opt-in flags stored on the profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSettings {
    pub public_profile: bool,
    pub email_notifications: bool,
    pub streak_reminders: bool,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            public_profile: true,
            email_notifications: false,
            streak_reminders: true,
        }
    }
}

/// An append-only gamification audit record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRecord {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub action_type: String,
    pub points: i32,
    pub xp: i32,
    /// False when a daily cap swallowed the reward
    pub rewarded: bool,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// A badge definition from the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub rarity: BadgeRarity,
    pub requirement: BadgeRequirement,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

impl Badge {
    /// Whether the badge can currently be earned
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        let started = self.starts_at.map(|s| s <= now).unwrap_or(true);
        let not_ended = self.ends_at.map(|e| now < e).unwrap_or(true);
        started && not_ended
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BadgeRarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl BadgeRarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeRarity::Common => "common",
            BadgeRarity::Uncommon => "uncommon",
            BadgeRarity::Rare => "rare",
            BadgeRarity::Epic => "epic",
            BadgeRarity::Legendary => "legendary",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "uncommon" => BadgeRarity::Uncommon,
            "rare" => BadgeRarity::Rare,
            "epic" => BadgeRarity::Epic,
            "legendary" => BadgeRarity::Legendary,
            _ => BadgeRarity::Common,
        }
    }
}

/// The unlock predicate for a badge
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BadgeRequirement {
    /// Cumulative XP at or above the threshold
    XpTotal { threshold: i64 },
    /// Current streak at or above the threshold
    StreakDays { threshold: i32 },
    /// Rewarded actions of a given type at or above the threshold
    ActionCount { action_type: String, threshold: i64 },
}

/// A badge earned by a profile (at most one row per pair)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileBadge {
    pub profile_id: Uuid,
    pub badge_id: String,
    pub earned_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A time-boxed quest rewarding repeated actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Challenge {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub cadence: ChallengeCadence,
    pub action_type: String,
    pub target: i32,
    pub reward_points: i32,
    pub reward_xp: i32,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl Challenge {
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.starts_at <= now && now < self.ends_at
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeCadence {
    Daily,
    Weekly,
    Monthly,
}

impl ChallengeCadence {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeCadence::Daily => "daily",
            ChallengeCadence::Weekly => "weekly",
            ChallengeCadence::Monthly => "monthly",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "daily" => ChallengeCadence::Daily,
            "monthly" => ChallengeCadence::Monthly,
            _ => ChallengeCadence::Weekly,
        }
    }
}

/// Per-profile progress toward a challenge target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeProgress {
    pub challenge_id: Uuid,
    pub profile_id: Uuid,
    pub progress: i32,
    pub status: ChallengeStatus,
    pub completed_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

/// Monotonic: not_started -> in_progress -> completed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl ChallengeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeStatus::NotStarted => "not_started",
            ChallengeStatus::InProgress => "in_progress",
            ChallengeStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "in_progress" => ChallengeStatus::InProgress,
            "completed" => ChallengeStatus::Completed,
            _ => ChallengeStatus::NotStarted,
        }
    }
}

/// A saved post in the reader's library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A highlighted passage within a post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Highlight {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub color: Option<String>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Reading position for a (profile, post) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingHistoryEntry {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub post_id: Uuid,
    pub progress_percent: i32,
    pub last_read_at: DateTime<Utc>,
}

/// A curated list of posts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingList {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post pinned into a reading list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingListItem {
    pub id: Uuid,
    pub list_id: Uuid,
    pub post_id: Uuid,
    pub position: i32,
    pub added_at: DateTime<Utc>,
}

/// Leaderboard entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: i32,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub level: i32,
    /// XP earned within the requested period
    pub score: i64,
}
