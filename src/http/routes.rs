use super::handlers;
use super::state::AppState;
use axum::{routing::get, Router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.static_dir);

    Router::new()
        // Pages
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        // Presence API
        .route("/dashboard/state", get(handlers::get_state))
        .route("/dashboard/presence", get(handlers::set_presence))
        .route("/dashboard/awayreason", get(handlers::set_away_reason))
        // Everything else under /dashboard/ is a static asset
        .nest_service("/dashboard", assets)
        // Any other path renders the dashboard page
        .fallback(handlers::index)
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
