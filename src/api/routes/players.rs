use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{Match, Player, PlayerId};
use crate::storage::NewPlayer;

#[derive(Debug, Serialize)]
pub struct PlayersResponse {
    pub players: Vec<Player>,
}

#[derive(Debug, Serialize)]
pub struct PlayerMatchesResponse {
    pub player: Player,
    pub matches: Vec<Match>,
}

#[derive(Debug, Deserialize)]
pub struct RankingPointsRequest {
    pub license_number: String,
    pub single_ranking_points: u32,
}

pub async fn list_players(
    State(state): State<AppState>,
) -> Result<Json<PlayersResponse>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(PlayersResponse {
        players: store.players()?,
    }))
}

pub async fn register_player(
    State(state): State<AppState>,
    Json(request): Json<NewPlayer>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    let store = state.store.write().await;
    let player = store.register_player(request)?;
    Ok((StatusCode::CREATED, Json(player)))
}

/// Manually set a player's singles ranking points, looked up by licence.
pub async fn update_ranking_points(
    State(state): State<AppState>,
    Json(request): Json<RankingPointsRequest>,
) -> Result<Json<Player>, ApiError> {
    if request.license_number.trim().is_empty() {
        return Err(ApiError::BadRequest("Licence number is required".to_string()));
    }
    let store = state.store.write().await;
    let player =
        store.update_ranking_points(&request.license_number, request.single_ranking_points)?;
    Ok(Json(player))
}

pub async fn player_matches(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<PlayerMatchesResponse>, ApiError> {
    let id = PlayerId::new(id);
    let store = state.store.read().await;
    let player = store
        .player(id)?
        .ok_or_else(|| ApiError::NotFound(format!("Player {}", id)))?;
    let matches = store.matches_for(id)?;
    Ok(Json(PlayerMatchesResponse { player, matches }))
}
