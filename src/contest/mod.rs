pub mod days;
pub mod processor;
pub mod types;
pub mod validator;

pub use processor::{process_day, winners_for_day, DaySummary, PlayerOutcome};
pub use types::*;
pub use validator::{required_pick_count, submit_pick};
