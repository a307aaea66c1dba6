pub mod health;
pub mod page;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::documents::handlers::handle_parse;
use crate::screening::handlers::handle_analyze;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(page::index_page))
        .route("/health", get(health::health_handler))
        .route(
            "/api/parse",
            post(handle_parse).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/analyze", post(handle_analyze))
        .with_state(state)
}
