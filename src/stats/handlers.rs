use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use super::services::{weekly_stats, DailyTotals};
use crate::{error::ApiError, state::AppState};

pub fn stats_routes() -> Router<AppState> {
    Router::new().route("/stats/weekly", get(get_weekly_stats))
}

#[instrument(skip(state))]
pub async fn get_weekly_stats(
    State(state): State<AppState>,
) -> Result<Json<Vec<DailyTotals>>, ApiError> {
    let stats = weekly_stats(&state.db, state.clock.today()).await?;
    Ok(Json(stats))
}
