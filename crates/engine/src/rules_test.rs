#[cfg(test)]
mod tests {
    use crate::rules::*;

    #[test]
    fn test_unknown_action_type_has_no_rule() {
        assert_eq!(rule_for("made_up_action"), None);
        assert_eq!(rule_for(""), None);
    }

    #[test]
    fn test_known_types_have_positive_deltas() {
        for action_type in [
            "post_published",
            "comment_posted",
            "post_read",
            "post_liked",
            "highlight_created",
            "bookmark_added",
            "daily_check_in",
            "profile_completed",
        ] {
            let rule = rule_for(action_type).expect(action_type);
            assert!(rule.points > 0, "{} has no points", action_type);
            assert!(rule.xp > 0, "{} has no xp", action_type);
        }
    }

    #[test]
    fn test_check_in_capped_once_per_day() {
        let rule = rule_for("daily_check_in").unwrap();
        assert_eq!(rule.daily_cap, Some(1));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(rule_for("Post_Published").is_none());
    }
}
