//! Route Definitions
//!
//! Maps URLs to handlers with type-safe routing.

use super::handlers::*;
use axum::{
    routing::{get, patch, post, put},
    Router,
};
use std::sync::Arc;

/// Build the API router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check (high priority)
        .route("/health", get(health_handler))
        // Public contest surface
        .route("/status", get(status_handler))
        .route("/players", get(players_handler))
        .route("/players/:id", get(player_detail_handler))
        .route("/players/:id/picks", post(submit_pick_handler))
        .route("/games/:day", get(games_handler))
        // Admin surface, gated by the x-admin-token header
        .route("/admin/players", post(admin_create_player_handler))
        .route(
            "/admin/players/:id",
            patch(admin_update_player_handler).delete(admin_delete_player_handler),
        )
        .route("/admin/games/:day", put(admin_replace_games_handler))
        .route("/admin/games/:day/:game_id", patch(admin_update_game_handler))
        .route("/admin/config", get(admin_get_config_handler).put(admin_update_config_handler))
        .route("/admin/process/:day", post(admin_process_day_handler))
        // Attach shared state
        .with_state(state)
}
