use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::repo::NewFoodLog;
use crate::clock::parse_date;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedLogResponse {
    pub id: i64,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

const REQUIRED_FIELDS: [&str; 4] = ["food_name", "calories", "protein", "date"];

/// Validates a manual entry body field by field, reporting the first problem.
pub fn parse_new_log(body: &Value) -> Result<NewFoodLog, ApiError> {
    for field in REQUIRED_FIELDS {
        if body.get(field).is_none() {
            return Err(ApiError::bad_request(format!(
                "Missing required field: {}",
                field
            )));
        }
    }

    let invalid = |field: &str| ApiError::bad_request(format!("Invalid field: {}", field));
    let food_name = body["food_name"]
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| invalid("food_name"))?;
    let calories = body["calories"].as_f64().ok_or_else(|| invalid("calories"))?;
    let protein = body["protein"].as_f64().ok_or_else(|| invalid("protein"))?;
    let date = body["date"].as_str().ok_or_else(|| invalid("date"))?;
    if parse_date(date).is_none() {
        return Err(ApiError::bad_request(
            "Invalid date format, expected YYYY-MM-DD",
        ));
    }

    Ok(NewFoodLog {
        food_name: food_name.to_string(),
        calories,
        protein,
        date: date.to_string(),
    })
}
