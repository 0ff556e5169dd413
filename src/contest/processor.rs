//! Day-result processing.
//!
//! Converts a day's final games into per-player win/loss outcomes,
//! applies eliminations, and advances the contest to the next day.

use crate::contest::days;
use crate::contest::types::{
    ContestConfig, ContestError, Game, PickResult, Player, PlayerStatus, MAX_BUYBACKS,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::info;

/// Per-player line of a processed day's summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerOutcome {
    pub id: u32,
    pub name: String,
    pub status: PlayerStatus,
    /// `None` when the player was skipped (no picks, or not alive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<PickResult>,
}

/// Outcome of processing one day's results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySummary {
    pub day: String,
    /// Teams that won a final game on this day, sorted
    pub winners: Vec<String>,
    /// Day the contest advanced to, `None` after the championship
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advanced_to: Option<String>,
    pub outcomes: Vec<PlayerOutcome>,
}

/// Teams that won a game marked final on this day.
///
/// Games still in progress, or final without a recorded winner, simply
/// contribute nothing. Partial slates are tolerated.
pub fn winners_for_day(games: &[Game]) -> BTreeSet<String> {
    games
        .iter()
        .filter(|g| g.is_final)
        .filter_map(|g| g.winner.clone())
        .collect()
}

/// Apply a day's results to every affected player and advance the
/// contest day pointer.
///
/// A day whose results have already been graded is refused, so running
/// the processor twice cannot double-apply eliminations.
pub fn process_day(
    config: &mut ContestConfig,
    players: &mut [Player],
    games: &[Game],
    day: &str,
) -> Result<DaySummary, ContestError> {
    if !days::is_known_day(day) {
        return Err(ContestError::DayNotFound { day: day.to_string() });
    }

    if players
        .iter()
        .any(|p| matches!(p.results.get(day), Some(PickResult::Win) | Some(PickResult::Loss)))
    {
        return Err(ContestError::DayAlreadyProcessed { day: day.to_string() });
    }

    let winners = winners_for_day(games);
    let buyback_day = config.is_buyback_day(day);

    let mut outcomes = Vec::with_capacity(players.len());
    for player in players.iter_mut() {
        let picks = match player.picks.get(day) {
            Some(picks) if player.status == PlayerStatus::Alive => picks,
            _ => {
                outcomes.push(PlayerOutcome {
                    id: player.id,
                    name: player.name.clone(),
                    status: player.status,
                    result: None,
                });
                continue;
            }
        };

        let result = if picks.iter().all(|team| winners.contains(team)) {
            PickResult::Win
        } else {
            player.status = PlayerStatus::Eliminated;
            player.needs_buyback = buyback_day && player.buybacks < MAX_BUYBACKS;
            PickResult::Loss
        };
        player.results.insert(day.to_string(), result);

        outcomes.push(PlayerOutcome {
            id: player.id,
            name: player.name.clone(),
            status: player.status,
            result: Some(result),
        });
    }

    let advanced_to = days::next_day(day).map(|next| next.to_string());
    if let Some(next) = &advanced_to {
        config.current_day = Some(next.clone());
    }

    info!(
        day,
        winners = winners.len(),
        graded = outcomes.iter().filter(|o| o.result.is_some()).count(),
        "processed day results"
    );

    Ok(DaySummary {
        day: day.to_string(),
        winners: winners.into_iter().collect(),
        advanced_to,
        outcomes,
    })
}
