use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::monthly_standings;
use crate::models::{MonthWindow, Standings};

#[derive(Debug, Deserialize)]
pub struct StandingsParams {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

/// General ranking plus the jerseys of the requested month (current month by default).
pub async fn standings(
    State(state): State<AppState>,
    Query(params): Query<StandingsParams>,
) -> Result<Json<Standings>, ApiError> {
    let current = MonthWindow::containing(Utc::now().date_naive());
    let window = MonthWindow::new(
        params.month.unwrap_or(current.month()),
        params.year.unwrap_or(current.year()),
    )
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let (players, matches) = {
        let store = state.store.read().await;
        (store.players()?, store.matches()?)
    };

    Ok(Json(monthly_standings(&players, &matches, window)))
}
