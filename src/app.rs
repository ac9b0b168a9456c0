use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route(
            "/api/reminder-logs",
            get(handlers::list_logs).post(handlers::create_log),
        )
        .route("/api/reminder-logs/analytics", get(handlers::get_analytics))
        .with_state(state)
}
