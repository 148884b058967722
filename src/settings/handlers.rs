use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::repo;
use crate::{clock::format_timestamp, error::ApiError, logs::MessageResponse, state::AppState};

#[derive(Debug, Serialize)]
pub struct MaintenanceCaloriesResponse {
    pub maintenance_calories: i64,
}

pub fn settings_routes() -> Router<AppState> {
    Router::new().route(
        "/settings/maintenance-calories",
        get(get_maintenance_calories).post(update_maintenance_calories),
    )
}

#[instrument(skip(state))]
pub async fn get_maintenance_calories(
    State(state): State<AppState>,
) -> Result<Json<MaintenanceCaloriesResponse>, ApiError> {
    let maintenance_calories = repo::maintenance_calories(&state.db).await?;
    Ok(Json(MaintenanceCaloriesResponse {
        maintenance_calories,
    }))
}

#[instrument(skip(state, body))]
pub async fn update_maintenance_calories(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(body) = body?;
    let Some(calories) = positive_integer(body.get("maintenance_calories")) else {
        warn!(body = %body, "rejected maintenance calories");
        return Err(ApiError::bad_request(
            "Valid maintenance_calories integer is required",
        ));
    };

    let updated_at = format_timestamp(state.clock.now());
    repo::set_maintenance_calories(&state.db, calories, &updated_at).await?;

    info!(calories, "maintenance calories updated");
    Ok(Json(MessageResponse {
        message: "Maintenance calories updated successfully".into(),
    }))
}

/// Only JSON integers count; `2000.0` and `"2000"` are rejected.
fn positive_integer(v: Option<&Value>) -> Option<i64> {
    v?.as_i64().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn positive_integer_accepts_only_json_integers_above_zero() {
        assert_eq!(positive_integer(Some(&json!(2200))), Some(2200));
        assert_eq!(positive_integer(Some(&json!(0))), None);
        assert_eq!(positive_integer(Some(&json!(-5))), None);
        assert_eq!(positive_integer(Some(&json!(2000.5))), None);
        assert_eq!(positive_integer(Some(&json!("2000"))), None);
        assert_eq!(positive_integer(Some(&json!(true))), None);
        assert_eq!(positive_integer(None), None);
    }
}
