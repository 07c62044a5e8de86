#[cfg(test)]
mod tests {
    use crate::levels::*;

    // resolve_level tests against the static table
    #[test]
    fn test_zero_xp_is_level_1() {
        assert_eq!(resolve_level(0), 1);
    }

    #[test]
    fn test_level_boundary_is_inclusive() {
        assert_eq!(resolve_level(99), 1);
        assert_eq!(resolve_level(100), 2);
        assert_eq!(resolve_level(101), 2);
    }

    #[test]
    fn test_top_level_is_open_ended() {
        assert_eq!(resolve_level(11_000), 10);
        assert_eq!(resolve_level(1_000_000), 10);
    }

    #[test]
    fn test_monotonic_in_xp() {
        let mut last = 0;
        for xp in (0..20_000).step_by(37) {
            let level = resolve_level(xp);
            assert!(level >= last, "level regressed at xp={}", xp);
            last = level;
        }
    }

    #[test]
    fn test_stable_under_repeated_calls() {
        for xp in [0, 99, 100, 3_499, 3_500, 50_000] {
            assert_eq!(resolve_level(xp), resolve_level(xp));
        }
    }

    // resolve_level_in tests with an explicit table
    #[test]
    fn test_two_tier_table() {
        let thresholds = [(1, 0), (2, 100)];

        // 0 XP profile earning 120 XP lands on level 2
        assert_eq!(resolve_level_in(&thresholds, 0), 1);
        assert_eq!(resolve_level_in(&thresholds, 120), 2);
    }

    #[test]
    fn test_empty_table_defaults_to_level_1() {
        assert_eq!(resolve_level_in(&[], 500), 1);
    }

    // xp_to_next_level tests
    #[test]
    fn test_xp_to_next_level() {
        assert_eq!(xp_to_next_level(0), Some(100));
        assert_eq!(xp_to_next_level(250), Some(250));
    }

    #[test]
    fn test_no_next_level_at_the_top() {
        assert_eq!(xp_to_next_level(11_000), None);
    }

    #[test]
    fn test_thresholds_are_sorted() {
        let mut prev = i64::MIN;
        for (_, min_xp) in LEVEL_THRESHOLDS {
            assert!(*min_xp > prev);
            prev = *min_xp;
        }
    }
}
