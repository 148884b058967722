use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::dto::{parse_new_log, CreatedLogResponse, LogsQuery, MessageResponse};
use super::repo::{self, FoodLogEntry};
use crate::{clock::format_timestamp, error::ApiError, state::AppState};

pub fn logs_routes() -> Router<AppState> {
    Router::new()
        .route("/logs", get(list_logs).post(create_log).delete(clear_logs))
        .route("/logs/:id", delete(delete_log))
}

#[instrument(skip(state))]
pub async fn list_logs(
    State(state): State<AppState>,
    Query(q): Query<LogsQuery>,
) -> Result<Json<Vec<FoodLogEntry>>, ApiError> {
    let date = q.date.as_deref().filter(|d| !d.is_empty());
    let logs = repo::list(&state.db, date).await?;
    Ok(Json(logs))
}

#[instrument(skip(state, body))]
pub async fn create_log(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedLogResponse>), ApiError> {
    let Json(body) = body?;
    let entry = parse_new_log(&body).map_err(|e| {
        warn!(error = %e, "rejected food log");
        e
    })?;
    let created_at = format_timestamp(state.clock.now());
    let id = repo::insert(&state.db, &entry, &created_at).await?;

    info!(id, food = %entry.food_name, date = %entry.date, "food log added");
    Ok((
        StatusCode::CREATED,
        Json(CreatedLogResponse {
            id,
            message: "Food log added successfully".into(),
        }),
    ))
}

#[instrument(skip(state))]
pub async fn delete_log(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    if !repo::delete(&state.db, id).await? {
        return Err(ApiError::not_found("Log not found"));
    }
    info!(id, "food log deleted");
    Ok(Json(MessageResponse {
        message: "Food log deleted successfully".into(),
    }))
}

#[instrument(skip(state))]
pub async fn clear_logs(State(state): State<AppState>) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = repo::delete_all(&state.db).await?;
    info!(deleted, "all food logs deleted");
    Ok(Json(MessageResponse {
        message: format!("All {} food logs deleted successfully", deleted),
    }))
}
