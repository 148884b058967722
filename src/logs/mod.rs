use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod repo;

pub use dto::MessageResponse;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::logs_routes())
}
