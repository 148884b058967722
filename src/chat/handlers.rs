use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::instrument;

use super::dto::{ChatOutcome, ChatRequest};
use super::services::handle_chat;
use crate::{error::ApiError, state::AppState};

pub fn chat_routes() -> Router<AppState> {
    Router::new().route("/chat", post(process_chat))
}

#[instrument(skip(state, body))]
pub async fn process_chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatOutcome>, ApiError> {
    let Json(body) = body?;
    let outcome = handle_chat(&state, body.message.as_deref().unwrap_or_default()).await?;
    Ok(Json(outcome))
}
