pub mod health;

use axum::{routing::get, Router};

use crate::colleges::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/colleges", get(handlers::handle_list_colleges))
        .route("/api/v1/colleges/:id", get(handlers::handle_get_college))
        .route(
            "/api/v1/colleges/:id/enrich",
            get(handlers::handle_enrich_college),
        )
        .with_state(state)
}
