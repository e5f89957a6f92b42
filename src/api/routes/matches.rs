use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{Match, MatchId, MatchSubmission, PlayerId, SetScore};
use crate::scoring::{validate_match, validate_participants, MatchRejection};

#[derive(Debug, Serialize)]
pub struct MatchesResponse {
    pub matches: Vec<Match>,
}

/// Body of `PUT /api/matches/:id`. The editor stays side 1.
#[derive(Debug, Deserialize)]
pub struct AmendMatchRequest {
    pub editor_id: PlayerId,
    pub player2_id: PlayerId,
    pub match_date: NaiveDate,
    pub sets: Vec<SetScore>,
}

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub sets: Vec<SetScore>,
    pub player1_id: Option<PlayerId>,
    pub player2_id: Option<PlayerId>,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player1_sets: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player2_sets: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<MatchRejection>,
}

pub async fn list_matches(
    State(state): State<AppState>,
) -> Result<Json<MatchesResponse>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(MatchesResponse {
        matches: store.matches()?,
    }))
}

pub async fn record_match(
    State(state): State<AppState>,
    Json(submission): Json<MatchSubmission>,
) -> Result<(StatusCode, Json<Match>), ApiError> {
    let store = state.store.write().await;
    let recorded = store.record_match(submission)?;
    Ok((StatusCode::CREATED, Json(recorded)))
}

pub async fn amend_match(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(request): Json<AmendMatchRequest>,
) -> Result<Json<Match>, ApiError> {
    let submission = MatchSubmission {
        player1_id: request.editor_id,
        player2_id: request.player2_id,
        match_date: request.match_date,
        sets: request.sets,
    };
    let store = state.store.write().await;
    let amended = store.amend_match(MatchId::new(id), request.editor_id, submission)?;
    Ok(Json(amended))
}

/// Dry-run validation: never touches the store.
pub async fn validate(Json(request): Json<ValidateRequest>) -> Json<ValidateResponse> {
    let result = match (request.player1_id, request.player2_id) {
        (Some(p1), Some(p2)) => validate_participants(p1, p2),
        _ => Ok(()),
    }
    .and_then(|()| validate_match(&request.sets));

    Json(match result {
        Ok(tally) => ValidateResponse {
            valid: true,
            player1_sets: Some(tally.player1_sets),
            player2_sets: Some(tally.player2_sets),
            message: None,
            rejection: None,
        },
        Err(rejection) => ValidateResponse {
            valid: false,
            player1_sets: None,
            player2_sets: None,
            message: Some(rejection.to_string()),
            rejection: Some(rejection),
        },
    })
}
