#[cfg(test)]
mod tests {
    use crate::streaks::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_action_starts_at_one() {
        assert_eq!(next_streak(None, day(2026, 3, 10), 0), 1);
    }

    #[test]
    fn test_same_day_leaves_streak_alone() {
        let today = day(2026, 3, 10);
        assert_eq!(next_streak(Some(today), today, 4), 4);
    }

    #[test]
    fn test_consecutive_day_extends() {
        assert_eq!(next_streak(Some(day(2026, 3, 9)), day(2026, 3, 10), 4), 5);
    }

    #[test]
    fn test_gap_resets_to_one() {
        assert_eq!(next_streak(Some(day(2026, 3, 7)), day(2026, 3, 10), 12), 1);
    }

    #[test]
    fn test_extension_across_month_boundary() {
        assert_eq!(next_streak(Some(day(2026, 2, 28)), day(2026, 3, 1), 2), 3);
    }

    #[test]
    fn test_same_day_floors_at_one() {
        // A zeroed streak with a same-day action still counts as active
        let today = day(2026, 3, 10);
        assert_eq!(next_streak(Some(today), today, 0), 1);
    }
}
