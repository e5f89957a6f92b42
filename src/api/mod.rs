//! REST API endpoints.
//!
//! Axum-based HTTP API for registering players, reporting matches and
//! reading the monthly standings.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::scoring::MatchRejection;
use crate::storage::{LeagueError, StorageError};
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("{0}")]
    Rejected(MatchRejection),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<MatchRejection>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ApiError::Rejected(rejection) => (StatusCode::BAD_REQUEST, rejection.code()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        if let ApiError::Internal(message) = &self {
            tracing::error!("Request failed: {}", message);
        }

        let rejection = match &self {
            ApiError::Rejected(rejection) => Some(rejection.clone()),
            _ => None,
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
                rejection,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<LeagueError> for ApiError {
    fn from(e: LeagueError) -> Self {
        match e {
            LeagueError::Storage(e) => e.into(),
            LeagueError::Registration(e) => ApiError::BadRequest(e.to_string()),
            LeagueError::Rejected(rejection) => ApiError::Rejected(rejection),
            e @ (LeagueError::PlayerNotFound(_)
            | LeagueError::LicenseNotFound(_)
            | LeagueError::MatchNotFound(_)) => {
                ApiError::NotFound(e.to_string())
            }
            e @ LeagueError::NotMatchOwner { .. } => ApiError::Forbidden(e.to_string()),
        }
    }
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origin {
        "*" => layer.allow_origin(Any),
        origin => match HeaderValue::from_str(origin) {
            Ok(value) => layer.allow_origin(value),
            Err(_) => {
                tracing::warn!("Invalid CORS origin '{}', allowing any", origin);
                layer.allow_origin(Any)
            }
        },
    }
}

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origin);

    Router::new()
        .route("/api/health", get(routes::health))
        .route(
            "/api/players",
            get(routes::players::list_players).post(routes::players::register_player),
        )
        .route(
            "/api/players/ranking-points",
            post(routes::players::update_ranking_points),
        )
        .route(
            "/api/players/:id/matches",
            get(routes::players::player_matches),
        )
        .route(
            "/api/matches",
            get(routes::matches::list_matches).post(routes::matches::record_match),
        )
        .route("/api/matches/:id", put(routes::matches::amend_match))
        .route("/api/validate", post(routes::matches::validate))
        .route("/api/ranking", get(routes::ranking::standings))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchId, PlayerId, SetScore};
    use crate::scoring::SetRule;

    #[test]
    fn test_league_error_mapping() {
        let err: ApiError = LeagueError::PlayerNotFound(PlayerId::new(3)).into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = LeagueError::LicenseNotFound("42".to_string()).into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = LeagueError::NotMatchOwner {
            match_id: MatchId::new(1),
            editor: PlayerId::new(2),
        }
        .into();
        assert!(matches!(err, ApiError::Forbidden(_)));

        let err: ApiError = LeagueError::Rejected(MatchRejection::InconsistentThirdSet).into();
        assert!(matches!(
            err,
            ApiError::Rejected(MatchRejection::InconsistentThirdSet)
        ));
    }

    #[test]
    fn test_rejection_response_status() {
        let response = ApiError::Rejected(MatchRejection::InvalidSetScore {
            set_index: 0,
            score: SetScore::new(22, 21),
            rule: SetRule::ExtendedMargin,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::Forbidden("no".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
