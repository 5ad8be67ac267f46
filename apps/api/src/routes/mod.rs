pub mod app_config;
pub mod generate;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::gateway::GENERATE_PATH;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        .route("/api/config", get(app_config::handle_app_config))
        .route(GENERATE_PATH, post(generate::handle_generate))
        .route("/write", post(generate::handle_write))
        .with_state(state)
}
