//! API Request/Response Models
//!
//! DTOs for the public and admin endpoints. Full contest records
//! (players, games, summaries) serialize directly from the domain types.

use crate::contest::{DaySummary, Player, PlayerStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Contest status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_day: Option<String>,
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_message: Option<String>,
    pub players_alive: usize,
    pub players_total: usize,
    pub server_time: DateTime<Utc>,
}

/// Public per-player summary (pick history omitted)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: u32,
    pub name: String,
    pub status: PlayerStatus,
    pub buybacks: u8,
    pub needs_buyback: bool,
    pub spent: u32,
}

impl From<&Player> for PlayerSummary {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            status: player.status,
            buybacks: player.buybacks,
            needs_buyback: player.needs_buyback,
            spent: player.spent,
        }
    }
}

/// Pick submission body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitPickRequest {
    /// Defaults to the contest's current day when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    pub picks: Vec<String>,
    #[serde(default)]
    pub buyback: bool,
}

/// Admin: create a new player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlayerRequest {
    pub name: String,
}

/// Admin: whitelisted player field update.
///
/// Only these fields are mutable by hand; anything else changes through
/// pick submission or day processing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlayerRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PlayerStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buybacks: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_buyback: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spent: Option<u32>,
}

/// Admin: score/result update for one game
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGameRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_final: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
}

/// Admin: contest configuration update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateConfigRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyback_days: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_day: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_message: Option<String>,
}

/// Day processing response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessDayResponse {
    pub processed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub summary: DaySummary,
}
