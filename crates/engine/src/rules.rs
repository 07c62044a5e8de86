//! Points/XP rules table
//!
//! Fixed mapping from action type to reward deltas and per-day caps. Action
//! types not listed here are observed as no-ops by the pipeline.

/// Reward deltas for one action type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionRule {
    pub points: i32,
    pub xp: i32,
    /// Max rewarded occurrences per UTC day; None = uncapped
    pub daily_cap: Option<i64>,
}

const fn rule(points: i32, xp: i32, daily_cap: Option<i64>) -> ActionRule {
    ActionRule {
        points,
        xp,
        daily_cap,
    }
}

/// Look up the rule for an action type
pub fn rule_for(action_type: &str) -> Option<ActionRule> {
    let rule = match action_type {
        "post_published" => rule(75, 75, Some(5)),
        "comment_posted" => rule(5, 5, Some(10)),
        "post_read" => rule(2, 2, Some(20)),
        "post_liked" => rule(1, 1, Some(50)),
        "highlight_created" => rule(2, 2, Some(20)),
        "bookmark_added" => rule(1, 1, Some(10)),
        "daily_check_in" => rule(5, 5, Some(1)),
        "profile_completed" => rule(25, 25, Some(1)),
        _ => return None,
    };
    Some(rule)
}
