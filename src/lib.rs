//! Pickpool - Survivor-Pool Pick-Tracking Backend
//!
//! Tracks a single-elimination tournament survivor pool: players submit
//! team picks day by day, wrong picks eliminate them, and buybacks on
//! designated days keep them alive. Contest state lives in flat JSON
//! records behind a small REST surface.

pub mod api;
pub mod config;
pub mod contest;
pub mod errors;
pub mod storage;

pub use config::{AppConfig, ConfigLoader};
pub use contest::{
    process_day, required_pick_count, submit_pick, ContestConfig, ContestError, DaySummary, Game,
    GameSchedule, PickResult, Player, PlayerStatus,
};
pub use errors::{PoolError, PoolResult};
pub use storage::JsonStore;
