//! Request Handlers
//!
//! Every mutating handler holds the store lock for its whole
//! read-modify-write cycle, so pick submissions and day processing can
//! never interleave and lose updates.

use super::{
    errors::ApiError,
    middleware::{RequestId, ADMIN_TOKEN_HEADER},
    models::*,
};
use crate::contest::{
    self, ContestConfig, ContestError, Game, Player, PlayerStatus, MAX_BUYBACKS,
};
use crate::storage::JsonStore;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Extension, Json,
};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Shared application state
pub struct AppState {
    /// Single lock serializing all contest reads and writes
    pub store: Mutex<JsonStore>,
    pub version: String,
}

impl AppState {
    pub fn new(store: JsonStore) -> Self {
        Self {
            store: Mutex::new(store),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Compare the `x-admin-token` header against the configured credential.
fn require_admin(
    config: &ContestConfig,
    headers: &HeaderMap,
    request_id: &str,
) -> Result<(), ApiError> {
    let supplied = headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if supplied.is_empty() || supplied != config.admin_token {
        return Err(ApiError::unauthorized(
            request_id.to_string(),
            "Missing or invalid admin token".to_string(),
        ));
    }
    Ok(())
}

/// Health check handler - minimal response time
/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "Running".to_string() })
}

/// Contest status handler
/// GET /status
pub async fn status_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, ApiError> {
    let store = state.store.lock().await;
    let config = store
        .load_config()
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;
    let players = store
        .load_players()
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;

    let players_alive = players.iter().filter(|p| p.status == PlayerStatus::Alive).count();

    Ok(Json(StatusResponse {
        current_day: config.current_day,
        locked: config.locked,
        lock_message: if config.locked { Some(config.lock_message) } else { None },
        players_alive,
        players_total: players.len(),
        server_time: Utc::now(),
    }))
}

/// Player list handler
/// GET /players
pub async fn players_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PlayerSummary>>, ApiError> {
    let store = state.store.lock().await;
    let players = store
        .load_players()
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;

    Ok(Json(players.iter().map(PlayerSummary::from).collect()))
}

/// Player detail handler, full record including pick history
/// GET /players/:id
pub async fn player_detail_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Json<Player>, ApiError> {
    let store = state.store.lock().await;
    let players = store
        .load_players()
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;

    players
        .into_iter()
        .find(|p| p.id == id)
        .map(Json)
        .ok_or_else(|| {
            ApiError::from_contest(request_id.0.clone(), ContestError::PlayerNotFound { id })
        })
}

/// Game list handler for one day
/// GET /games/:day
pub async fn games_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Path(day): Path<String>,
) -> Result<Json<Vec<Game>>, ApiError> {
    if !contest::days::is_known_day(&day) {
        return Err(ApiError::from_contest(request_id.0, ContestError::DayNotFound { day }));
    }

    let store = state.store.lock().await;
    let schedule = store
        .load_games()
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;

    Ok(Json(schedule.get(&day).cloned().unwrap_or_default()))
}

/// Pick submission handler
/// POST /players/:id/picks
pub async fn submit_pick_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
    Json(request): Json<SubmitPickRequest>,
) -> Result<Json<Player>, ApiError> {
    let store = state.store.lock().await;
    let config = store
        .load_config()
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;

    if config.locked {
        let message = if config.lock_message.is_empty() {
            "Pick submissions are closed".to_string()
        } else {
            config.lock_message.clone()
        };
        return Err(ApiError::service_unavailable(request_id.0, message));
    }

    let day = match request.day.or_else(|| config.current_day.clone()) {
        Some(day) => day,
        None => {
            return Err(ApiError::bad_request(
                request_id.0,
                "No day given and the contest has not started".to_string(),
            ))
        }
    };

    let mut players = store
        .load_players()
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;
    let player = players.iter_mut().find(|p| p.id == id).ok_or_else(|| {
        ApiError::from_contest(request_id.0.clone(), ContestError::PlayerNotFound { id })
    })?;

    contest::submit_pick(player, &config, &day, &request.picks, request.buyback)
        .map_err(|e| ApiError::from_contest(request_id.0.clone(), e))?;
    let updated = player.clone();

    store
        .save_players(&players)
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;

    info!(player = updated.id, %day, buyback = request.buyback, "picks recorded");
    Ok(Json(updated))
}

/// Admin: create a player
/// POST /admin/players
pub async fn admin_create_player_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<CreatePlayerRequest>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    let store = state.store.lock().await;
    let config = store
        .load_config()
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;
    require_admin(&config, &headers, &request_id.0)?;

    let name = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::bad_request(request_id.0, "Player name is required".to_string()));
    }

    let mut players = store
        .load_players()
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;

    let id = players.iter().map(|p| p.id).max().unwrap_or(0) + 1;
    let player = Player::new(id, name.to_string());
    players.push(player.clone());

    store
        .save_players(&players)
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;

    info!(player = id, name, "player created");
    Ok((StatusCode::CREATED, Json(player)))
}

/// Admin: whitelisted player update
/// PATCH /admin/players/:id
pub async fn admin_update_player_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
    headers: HeaderMap,
    Json(request): Json<UpdatePlayerRequest>,
) -> Result<Json<Player>, ApiError> {
    let store = state.store.lock().await;
    let config = store
        .load_config()
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;
    require_admin(&config, &headers, &request_id.0)?;

    if let Some(buybacks) = request.buybacks {
        if buybacks > MAX_BUYBACKS {
            return Err(ApiError::bad_request(
                request_id.0,
                format!("buybacks cannot exceed {}", MAX_BUYBACKS),
            ));
        }
    }

    let mut players = store
        .load_players()
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;
    let player = players.iter_mut().find(|p| p.id == id).ok_or_else(|| {
        ApiError::from_contest(request_id.0.clone(), ContestError::PlayerNotFound { id })
    })?;

    if let Some(name) = request.name {
        player.name = name;
    }
    if let Some(status) = request.status {
        player.status = status;
    }
    if let Some(buybacks) = request.buybacks {
        player.buybacks = buybacks;
    }
    if let Some(needs_buyback) = request.needs_buyback {
        player.needs_buyback = needs_buyback;
    }
    if let Some(spent) = request.spent {
        player.spent = spent;
    }
    let updated = player.clone();

    store
        .save_players(&players)
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;

    Ok(Json(updated))
}

/// Admin: delete a player
/// DELETE /admin/players/:id
pub async fn admin_delete_player_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let store = state.store.lock().await;
    let config = store
        .load_config()
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;
    require_admin(&config, &headers, &request_id.0)?;

    let mut players = store
        .load_players()
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;
    let before = players.len();
    players.retain(|p| p.id != id);
    if players.len() == before {
        return Err(ApiError::from_contest(request_id.0, ContestError::PlayerNotFound { id }));
    }

    store
        .save_players(&players)
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;

    info!(player = id, "player deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Admin: replace one day's game slate
/// PUT /admin/games/:day
pub async fn admin_replace_games_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Path(day): Path<String>,
    headers: HeaderMap,
    Json(games): Json<Vec<Game>>,
) -> Result<Json<Vec<Game>>, ApiError> {
    let store = state.store.lock().await;
    let config = store
        .load_config()
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;
    require_admin(&config, &headers, &request_id.0)?;

    if !contest::days::is_known_day(&day) {
        return Err(ApiError::from_contest(request_id.0, ContestError::DayNotFound { day }));
    }

    let mut seen = std::collections::HashSet::new();
    for game in &games {
        if !seen.insert(game.id) {
            return Err(ApiError::bad_request(
                request_id.0,
                format!("Duplicate game id {} on {}", game.id, day),
            ));
        }
        if !game.winner_is_participant() {
            return Err(ApiError::bad_request(
                request_id.0,
                format!("Winner of game {} is not a participant", game.id),
            ));
        }
    }

    let mut schedule = store
        .load_games()
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;
    schedule.insert(day.clone(), games.clone());

    store
        .save_games(&schedule)
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;

    info!(%day, count = games.len(), "game slate replaced");
    Ok(Json(games))
}

/// Admin: update one game's scores and result
/// PATCH /admin/games/:day/:game_id
pub async fn admin_update_game_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Path((day, game_id)): Path<(String, u32)>,
    headers: HeaderMap,
    Json(request): Json<UpdateGameRequest>,
) -> Result<Json<Game>, ApiError> {
    let store = state.store.lock().await;
    let config = store
        .load_config()
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;
    require_admin(&config, &headers, &request_id.0)?;

    let mut schedule = store
        .load_games()
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;
    let game = schedule
        .get_mut(&day)
        .and_then(|games| games.iter_mut().find(|g| g.id == game_id))
        .ok_or_else(|| {
            ApiError::from_contest(
                request_id.0.clone(),
                ContestError::GameNotFound { day: day.clone(), id: game_id },
            )
        })?;

    if let Some(home_score) = request.home_score {
        game.home_score = Some(home_score);
    }
    if let Some(away_score) = request.away_score {
        game.away_score = Some(away_score);
    }
    if let Some(is_final) = request.is_final {
        game.is_final = is_final;
    }
    if let Some(winner) = request.winner {
        game.winner = Some(winner);
    }
    if !game.winner_is_participant() {
        return Err(ApiError::bad_request(
            request_id.0,
            format!("Winner of game {} is not a participant", game_id),
        ));
    }
    let updated = game.clone();

    store
        .save_games(&schedule)
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;

    Ok(Json(updated))
}

/// Admin: read the full contest configuration
/// GET /admin/config
pub async fn admin_get_config_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ContestConfig>, ApiError> {
    let store = state.store.lock().await;
    let config = store
        .load_config()
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;
    require_admin(&config, &headers, &request_id.0)?;

    Ok(Json(config))
}

/// Admin: update the contest configuration
/// PUT /admin/config
pub async fn admin_update_config_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<UpdateConfigRequest>,
) -> Result<Json<ContestConfig>, ApiError> {
    let store = state.store.lock().await;
    let mut config = store
        .load_config()
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;
    require_admin(&config, &headers, &request_id.0)?;

    if let Some(day) = &request.current_day {
        if !contest::days::is_known_day(day) {
            return Err(ApiError::from_contest(
                request_id.0,
                ContestError::DayNotFound { day: day.clone() },
            ));
        }
    }
    for day in request.buyback_days.iter().flatten() {
        if !contest::days::is_known_day(day) {
            return Err(ApiError::from_contest(
                request_id.0,
                ContestError::DayNotFound { day: day.clone() },
            ));
        }
    }

    if let Some(teams) = request.teams {
        config.teams = teams;
    }
    if let Some(buyback_days) = request.buyback_days {
        config.buyback_days = buyback_days;
    }
    if let Some(day) = request.current_day {
        config.current_day = Some(day);
    }
    if let Some(locked) = request.locked {
        config.locked = locked;
    }
    if let Some(lock_message) = request.lock_message {
        config.lock_message = lock_message;
    }

    store
        .save_config(&config)
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;

    info!(locked = config.locked, "contest config updated");
    Ok(Json(config))
}

/// Admin: process one day's results
/// POST /admin/process/:day
pub async fn admin_process_day_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Path(day): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ProcessDayResponse>, ApiError> {
    let store = state.store.lock().await;
    let mut config = store
        .load_config()
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;
    require_admin(&config, &headers, &request_id.0)?;

    let mut players = store
        .load_players()
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;
    let schedule = store
        .load_games()
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;
    let games = schedule.get(&day).cloned().unwrap_or_default();

    let summary = contest::process_day(&mut config, &mut players, &games, &day)
        .map_err(|e| ApiError::from_contest(request_id.0.clone(), e))?;

    store
        .save_config(&config)
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;
    store
        .save_players(&players)
        .map_err(|e| ApiError::from_pool(request_id.0.clone(), e))?;

    Ok(Json(ProcessDayResponse { processed_at: Utc::now(), summary }))
}
