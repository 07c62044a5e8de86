//! Streak arithmetic

use chrono::NaiveDate;

/// Next streak value given the date of the last rewarded action.
///
/// Same day leaves the streak alone, the next day extends it, any gap
/// resets to one.
pub fn next_streak(last_action_on: Option<NaiveDate>, today: NaiveDate, current: i32) -> i32 {
    match last_action_on {
        None => 1,
        Some(last) if last == today => current.max(1),
        Some(last) if last.succ_opt() == Some(today) => current + 1,
        Some(_) => 1,
    }
}
