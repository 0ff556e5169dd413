//! The fixed tournament day sequence.
//!
//! Ten sessions from the opening round through the championship. The
//! ordering is domain knowledge baked into the bracket, not data.

/// Tournament sessions in chronological order.
pub const DAY_SEQUENCE: [&str; 10] = [
    "round1-thursday",
    "round1-friday",
    "round2-saturday",
    "round2-sunday",
    "sweet16-thursday",
    "sweet16-friday",
    "elite8-saturday",
    "elite8-sunday",
    "final-four",
    "championship",
];

/// Number of picks owed per day when the player is in good standing.
pub const PICKS_OPENING_ROUND: usize = 2;
pub const PICKS_REGULAR: usize = 1;

/// Elevated pick counts owed when a buyback is pending. The second day
/// covers both opening-round slates, hence the extra picks.
pub const PICKS_BUYBACK_SECOND_DAY: usize = 4;
pub const PICKS_BUYBACK_REGULAR: usize = 3;

/// Position of `day` in the sequence, if it is a known day.
pub fn day_index(day: &str) -> Option<usize> {
    DAY_SEQUENCE.iter().position(|d| *d == day)
}

pub fn is_known_day(day: &str) -> bool {
    day_index(day).is_some()
}

/// Opening-round days carry a two-pick requirement.
pub fn is_opening_round(day: &str) -> bool {
    matches!(day_index(day), Some(0) | Some(1))
}

/// The day a buyback's elevated four-pick requirement applies to.
pub fn is_second_day(day: &str) -> bool {
    day_index(day) == Some(1)
}

/// Successor of `day` in the sequence. The championship is terminal.
pub fn next_day(day: &str) -> Option<&'static str> {
    let idx = day_index(day)?;
    DAY_SEQUENCE.get(idx + 1).copied()
}
