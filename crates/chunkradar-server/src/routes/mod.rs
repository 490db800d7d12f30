//! HTTP route handlers — matches the frontend's `/api` surface.

pub mod chunks;
pub mod confidence;
pub mod groups;
pub mod progress;
pub mod settings;
pub mod stats;
pub mod stories;
pub mod streak;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(groups::routes())
        .merge(chunks::routes())
        .merge(stats::routes())
        .merge(progress::routes())
        .merge(settings::routes())
        .merge(streak::routes())
        .merge(confidence::routes())
        .merge(stories::routes())
}
