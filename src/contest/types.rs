use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Entry fee charged for a buyback, in whole dollars.
pub const BUYBACK_COST: u32 = 25;

/// Hard cap on re-entries per player for the whole contest.
pub const MAX_BUYBACKS: u8 = 3;

/// Player liveness in the pool
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    Alive,
    Eliminated,
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerStatus::Alive => write!(f, "alive"),
            PlayerStatus::Eliminated => write!(f, "eliminated"),
        }
    }
}

/// Outcome of a player's pick list for one day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PickResult {
    Pending,
    Win,
    Loss,
}

impl fmt::Display for PickResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickResult::Pending => write!(f, "pending"),
            PickResult::Win => write!(f, "win"),
            PickResult::Loss => write!(f, "loss"),
        }
    }
}

/// Contest-wide configuration record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContestConfig {
    /// Ordered roster of valid team identifiers
    pub teams: Vec<String>,
    /// Days on which an eliminated player may buy back in
    #[serde(default)]
    pub buyback_days: Vec<String>,
    /// Active day, always a member of the day sequence once set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_day: Option<String>,
    /// When locked, pick submissions are refused with `lock_message`
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub lock_message: String,
    /// Credential compared against the `x-admin-token` header
    pub admin_token: String,
}

impl ContestConfig {
    /// Fresh contest record for a newly initialized data directory
    pub fn bootstrap(admin_token: String) -> Self {
        Self {
            teams: Vec::new(),
            buyback_days: Vec::new(),
            current_day: None,
            locked: false,
            lock_message: String::new(),
            admin_token,
        }
    }

    pub fn is_valid_team(&self, team: &str) -> bool {
        self.teams.iter().any(|t| t == team)
    }

    pub fn is_buyback_day(&self, day: &str) -> bool {
        self.buyback_days.iter().any(|d| d == day)
    }
}

/// One contestant in the pool
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub status: PlayerStatus,
    /// Re-entries used so far, never exceeds [`MAX_BUYBACKS`]
    #[serde(default)]
    pub buybacks: u8,
    /// Set when the player lost on a buyback-eligible day and owes
    /// a buyback submission before playing again
    #[serde(default)]
    pub needs_buyback: bool,
    /// Cumulative dollars paid in (entry plus buybacks)
    #[serde(default)]
    pub spent: u32,
    /// Day identifier -> teams picked that day
    #[serde(default)]
    pub picks: BTreeMap<String, Vec<String>>,
    /// Day identifier -> result of that day's picks
    #[serde(default)]
    pub results: BTreeMap<String, PickResult>,
}

impl Player {
    pub fn new(id: u32, name: String) -> Self {
        Self {
            id,
            name,
            status: PlayerStatus::Alive,
            buybacks: 0,
            needs_buyback: false,
            spent: 0,
            picks: BTreeMap::new(),
            results: BTreeMap::new(),
        }
    }

    /// True if `team` already appears in any of the player's recorded
    /// pick lists. Teams are burned for the contest lifetime, not per day.
    pub fn has_picked(&self, team: &str) -> bool {
        self.picks.values().any(|list| list.iter().any(|t| t == team))
    }
}

/// One scheduled game on a given day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Game {
    /// Unique within the day it belongs to
    pub id: u32,
    pub home: String,
    pub away: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_score: Option<u32>,
    #[serde(default)]
    pub is_final: bool,
    /// Set once final; must be one of the two participants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
}

impl Game {
    /// Winner, when present, must be a participant.
    pub fn winner_is_participant(&self) -> bool {
        match &self.winner {
            Some(w) => *w == self.home || *w == self.away,
            None => true,
        }
    }
}

/// Full game schedule, keyed by day identifier
pub type GameSchedule = BTreeMap<String, Vec<Game>>;

/// Validation failures for contest operations.
///
/// Every variant is a locally recoverable client error carrying the
/// message shown to the submitting player or admin.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContestError {
    #[error("Picks already submitted for {day}")]
    AlreadySubmitted { day: String },

    #[error("Duplicate pick: {team}")]
    DuplicatePick { team: String },

    #[error("Team already used on a previous day: {team}")]
    TeamReused { team: String },

    #[error("Unknown team: {team}")]
    InvalidTeam { team: String },

    #[error("Expected {expected} pick(s), got {got}")]
    WrongPickCount { expected: usize, got: usize },

    #[error("Buyback limit reached")]
    BuybackLimitReached,

    #[error("Buybacks are not allowed on {day}")]
    BuybackNotAllowedToday { day: String },

    #[error("Player {id} not found")]
    PlayerNotFound { id: u32 },

    #[error("Unknown day: {day}")]
    DayNotFound { day: String },

    #[error("Game {id} not found on {day}")]
    GameNotFound { day: String, id: u32 },

    #[error("Results for {day} have already been processed")]
    DayAlreadyProcessed { day: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_has_picked_across_days() {
        let mut player = Player::new(1, "Dana".to_string());
        player
            .picks
            .insert("round1-thursday".to_string(), vec!["duke".to_string(), "gonzaga".to_string()]);
        player
            .picks
            .insert("round2-saturday".to_string(), vec!["houston".to_string()]);

        assert!(player.has_picked("duke"));
        assert!(player.has_picked("houston"));
        assert!(!player.has_picked("purdue"));
    }

    #[test]
    fn test_game_winner_must_be_participant() {
        let mut game = Game {
            id: 1,
            home: "duke".to_string(),
            away: "vermont".to_string(),
            home_score: Some(80),
            away_score: Some(62),
            is_final: true,
            winner: Some("duke".to_string()),
        };
        assert!(game.winner_is_participant());

        game.winner = Some("gonzaga".to_string());
        assert!(!game.winner_is_participant());

        game.winner = None;
        assert!(game.winner_is_participant());
    }

    #[test]
    fn test_config_lookups() {
        let mut config = ContestConfig::bootstrap("secret".to_string());
        config.teams = vec!["duke".to_string(), "gonzaga".to_string()];
        config.buyback_days = vec!["round1-friday".to_string()];

        assert!(config.is_valid_team("duke"));
        assert!(!config.is_valid_team("houston"));
        assert!(config.is_buyback_day("round1-friday"));
        assert!(!config.is_buyback_day("championship"));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&PlayerStatus::Eliminated).unwrap();
        assert_eq!(json, "\"eliminated\"");
        let json = serde_json::to_string(&PickResult::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
    }
}
