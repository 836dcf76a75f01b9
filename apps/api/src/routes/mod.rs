pub mod download;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/generate-resume", post(handlers::handle_generate_resume))
        .route(
            "/generate-cover-letter",
            post(handlers::handle_generate_cover_letter),
        )
        .route("/download/:filename", get(download::download_handler))
        .with_state(state)
}
