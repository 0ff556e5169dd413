//! Pick-submission validation.
//!
//! Checks run in a fixed order so the first failure is the one the
//! player sees; nothing is mutated until every check has passed.

use crate::contest::days;
use crate::contest::types::{
    ContestConfig, ContestError, PickResult, Player, PlayerStatus, BUYBACK_COST, MAX_BUYBACKS,
};
use std::collections::HashSet;

/// Number of picks a player owes on `day`.
///
/// Players in good standing owe two picks on each opening-round day and
/// one thereafter. A player with a pending buyback owes the elevated
/// count: four on the second day, three on any other day.
pub fn required_pick_count(player: &Player, day: &str) -> usize {
    if player.needs_buyback {
        if days::is_second_day(day) {
            days::PICKS_BUYBACK_SECOND_DAY
        } else {
            days::PICKS_BUYBACK_REGULAR
        }
    } else if days::is_opening_round(day) {
        days::PICKS_OPENING_ROUND
    } else {
        days::PICKS_REGULAR
    }
}

/// Validate a pick submission and, when legal, record it on the player.
///
/// A rejected submission leaves the player untouched. Resubmission for a
/// day that already has picks is refused outright, never merged.
pub fn submit_pick(
    player: &mut Player,
    config: &ContestConfig,
    day: &str,
    picks: &[String],
    is_buyback: bool,
) -> Result<(), ContestError> {
    if !days::is_known_day(day) {
        return Err(ContestError::DayNotFound { day: day.to_string() });
    }

    if player.picks.contains_key(day) {
        return Err(ContestError::AlreadySubmitted { day: day.to_string() });
    }

    let mut seen = HashSet::new();
    for team in picks {
        if !seen.insert(team.as_str()) {
            return Err(ContestError::DuplicatePick { team: team.clone() });
        }
    }

    for team in picks {
        if player.has_picked(team) {
            return Err(ContestError::TeamReused { team: team.clone() });
        }
    }

    for team in picks {
        if !config.is_valid_team(team) {
            return Err(ContestError::InvalidTeam { team: team.clone() });
        }
    }

    let expected = required_pick_count(player, day);
    if picks.len() != expected {
        return Err(ContestError::WrongPickCount {
            expected,
            got: picks.len(),
        });
    }

    if is_buyback {
        if player.buybacks >= MAX_BUYBACKS {
            return Err(ContestError::BuybackLimitReached);
        }
        if !config.is_buyback_day(day) {
            return Err(ContestError::BuybackNotAllowedToday { day: day.to_string() });
        }
        player.status = PlayerStatus::Alive;
        player.buybacks += 1;
        player.spent += BUYBACK_COST;
        player.needs_buyback = false;
    }

    player.picks.insert(day.to_string(), picks.to_vec());
    player.results.insert(day.to_string(), PickResult::Pending);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_config() -> ContestConfig {
        let mut config = ContestConfig::bootstrap("secret".to_string());
        config.teams = ["duke", "gonzaga", "houston", "purdue", "auburn", "tennessee"]
            .iter()
            .map(|t| t.to_string())
            .collect();
        config.buyback_days = vec!["round2-sunday".to_string()];
        config
    }

    fn picks(teams: &[&str]) -> Vec<String> {
        teams.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_required_pick_count_in_good_standing() {
        let player = Player::new(1, "Dana".to_string());
        assert_eq!(required_pick_count(&player, "round1-thursday"), 2);
        assert_eq!(required_pick_count(&player, "round1-friday"), 2);
        assert_eq!(required_pick_count(&player, "round2-saturday"), 1);
        assert_eq!(required_pick_count(&player, "championship"), 1);
    }

    #[test]
    fn test_required_pick_count_with_pending_buyback() {
        let mut player = Player::new(1, "Dana".to_string());
        player.needs_buyback = true;
        assert_eq!(required_pick_count(&player, "round1-friday"), 4);
        assert_eq!(required_pick_count(&player, "round1-thursday"), 3);
        assert_eq!(required_pick_count(&player, "round2-sunday"), 3);
    }

    #[test]
    fn test_successful_submission_records_pending_result() {
        let config = roster_config();
        let mut player = Player::new(1, "Dana".to_string());

        submit_pick(&mut player, &config, "round1-thursday", &picks(&["duke", "gonzaga"]), false)
            .unwrap();

        assert_eq!(player.picks["round1-thursday"], picks(&["duke", "gonzaga"]));
        assert_eq!(player.results["round1-thursday"], PickResult::Pending);
        assert_eq!(player.status, PlayerStatus::Alive);
        assert_eq!(player.spent, 0);
    }

    #[test]
    fn test_resubmission_is_rejected_and_state_unchanged() {
        let config = roster_config();
        let mut player = Player::new(1, "Dana".to_string());
        submit_pick(&mut player, &config, "round1-thursday", &picks(&["duke", "gonzaga"]), false)
            .unwrap();

        let before = player.clone();
        let err = submit_pick(
            &mut player,
            &config,
            "round1-thursday",
            &picks(&["houston", "purdue"]),
            false,
        )
        .unwrap_err();

        assert_eq!(err, ContestError::AlreadySubmitted { day: "round1-thursday".to_string() });
        assert_eq!(player, before);
    }

    #[test]
    fn test_duplicate_pick_within_day() {
        let config = roster_config();
        let mut player = Player::new(1, "Dana".to_string());
        let err =
            submit_pick(&mut player, &config, "round1-thursday", &picks(&["duke", "duke"]), false)
                .unwrap_err();
        assert_eq!(err, ContestError::DuplicatePick { team: "duke".to_string() });
        assert!(player.picks.is_empty());
    }

    #[test]
    fn test_team_reuse_across_days() {
        let config = roster_config();
        let mut player = Player::new(1, "Dana".to_string());
        submit_pick(&mut player, &config, "round1-thursday", &picks(&["duke", "gonzaga"]), false)
            .unwrap();

        let err = submit_pick(&mut player, &config, "round2-saturday", &picks(&["duke"]), false)
            .unwrap_err();
        assert_eq!(err, ContestError::TeamReused { team: "duke".to_string() });
        assert!(!player.picks.contains_key("round2-saturday"));
    }

    #[test]
    fn test_unknown_team_rejected() {
        let config = roster_config();
        let mut player = Player::new(1, "Dana".to_string());
        let err = submit_pick(
            &mut player,
            &config,
            "round1-thursday",
            &picks(&["duke", "hoboken-tech"]),
            false,
        )
        .unwrap_err();
        assert_eq!(err, ContestError::InvalidTeam { team: "hoboken-tech".to_string() });
    }

    #[test]
    fn test_reuse_checked_before_roster_membership() {
        // A burned team that is also off-roster reports as reused, matching
        // the user-facing check order.
        let mut config = roster_config();
        let mut player = Player::new(1, "Dana".to_string());
        submit_pick(&mut player, &config, "round1-thursday", &picks(&["duke", "gonzaga"]), false)
            .unwrap();
        config.teams.retain(|t| t != "duke");

        let err = submit_pick(&mut player, &config, "round2-saturday", &picks(&["duke"]), false)
            .unwrap_err();
        assert_eq!(err, ContestError::TeamReused { team: "duke".to_string() });
    }

    #[test]
    fn test_wrong_pick_count() {
        let config = roster_config();
        let mut player = Player::new(1, "Dana".to_string());
        let err = submit_pick(&mut player, &config, "round1-thursday", &picks(&["duke"]), false)
            .unwrap_err();
        assert_eq!(err, ContestError::WrongPickCount { expected: 2, got: 1 });
    }

    #[test]
    fn test_unknown_day_rejected() {
        let config = roster_config();
        let mut player = Player::new(1, "Dana".to_string());
        let err = submit_pick(&mut player, &config, "play-in", &picks(&["duke"]), false)
            .unwrap_err();
        assert_eq!(err, ContestError::DayNotFound { day: "play-in".to_string() });
    }

    #[test]
    fn test_buyback_limit_trumps_day_eligibility() {
        let config = roster_config();
        let mut player = Player::new(1, "Dana".to_string());
        player.status = PlayerStatus::Eliminated;
        player.needs_buyback = true;
        player.buybacks = MAX_BUYBACKS;

        // Not a buyback day either, but the limit check fires first.
        let err = submit_pick(
            &mut player,
            &config,
            "round2-saturday",
            &picks(&["duke", "gonzaga", "houston"]),
            true,
        )
        .unwrap_err();
        assert_eq!(err, ContestError::BuybackLimitReached);
        assert_eq!(player.status, PlayerStatus::Eliminated);
    }

    #[test]
    fn test_buyback_refused_outside_eligible_days() {
        let config = roster_config();
        let mut player = Player::new(1, "Dana".to_string());
        player.status = PlayerStatus::Eliminated;
        player.needs_buyback = true;

        let err = submit_pick(
            &mut player,
            &config,
            "round2-saturday",
            &picks(&["duke", "gonzaga", "houston"]),
            true,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ContestError::BuybackNotAllowedToday { day: "round2-saturday".to_string() }
        );
        assert_eq!(player.status, PlayerStatus::Eliminated);
        assert!(player.needs_buyback);
    }

    #[test]
    fn test_buyback_revives_player_and_charges_fee() {
        let config = roster_config();
        let mut player = Player::new(1, "Dana".to_string());
        player.status = PlayerStatus::Eliminated;
        player.needs_buyback = true;
        player.buybacks = 1;
        player.spent = 50;

        submit_pick(
            &mut player,
            &config,
            "round2-sunday",
            &picks(&["duke", "gonzaga", "houston"]),
            true,
        )
        .unwrap();

        assert_eq!(player.status, PlayerStatus::Alive);
        assert_eq!(player.buybacks, 2);
        assert_eq!(player.spent, 50 + BUYBACK_COST);
        assert!(!player.needs_buyback);
        assert_eq!(player.results["round2-sunday"], PickResult::Pending);
    }

    #[test]
    fn test_buybacks_never_exceed_cap() {
        let mut config = roster_config();
        config.buyback_days.push("sweet16-thursday".to_string());
        config.teams.extend(picks(&["alabama", "uconn", "kansas"]));

        let mut player = Player::new(1, "Dana".to_string());
        player.status = PlayerStatus::Eliminated;
        player.needs_buyback = true;
        player.buybacks = 2;

        submit_pick(
            &mut player,
            &config,
            "round2-sunday",
            &picks(&["duke", "gonzaga", "houston"]),
            true,
        )
        .unwrap();
        assert_eq!(player.buybacks, MAX_BUYBACKS);

        player.status = PlayerStatus::Eliminated;
        player.needs_buyback = true;
        let err = submit_pick(
            &mut player,
            &config,
            "sweet16-thursday",
            &picks(&["alabama", "uconn", "kansas"]),
            true,
        )
        .unwrap_err();
        assert_eq!(err, ContestError::BuybackLimitReached);
        assert_eq!(player.buybacks, MAX_BUYBACKS);
    }
}
