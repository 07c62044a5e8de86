//! Level resolution from cumulative XP

/// Ordered (level, min_xp) thresholds. A profile's level is the highest
/// entry whose threshold is at or below its cumulative XP.
pub const LEVEL_THRESHOLDS: &[(i32, i64)] = &[
    (1, 0),
    (2, 100),
    (3, 250),
    (4, 500),
    (5, 1_000),
    (6, 2_000),
    (7, 3_500),
    (8, 5_500),
    (9, 8_000),
    (10, 11_000),
];

/// Resolve a level against an ordered threshold table
pub fn resolve_level_in(thresholds: &[(i32, i64)], xp_total: i64) -> i32 {
    let mut level = thresholds.first().map(|(l, _)| *l).unwrap_or(1);
    for (candidate, min_xp) in thresholds {
        if xp_total >= *min_xp {
            level = *candidate;
        } else {
            break;
        }
    }
    level
}

/// Resolve a level from cumulative XP against the static table
pub fn resolve_level(xp_total: i64) -> i32 {
    resolve_level_in(LEVEL_THRESHOLDS, xp_total)
}

/// XP still needed to reach the next level, if any
pub fn xp_to_next_level(xp_total: i64) -> Option<i64> {
    LEVEL_THRESHOLDS
        .iter()
        .find(|(_, min_xp)| *min_xp > xp_total)
        .map(|(_, min_xp)| min_xp - xp_total)
}
