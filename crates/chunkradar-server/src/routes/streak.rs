//! Streak route.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use crate::error::{on_error, ApiResult};
use crate::state::AppState;
use chunkradar_core::time::today;
use chunkradar_study::streak::streak_info;
use chunkradar_study::StreakInfo;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/streak", get(get_streak))
}

/// GET /api/streak — recomputed on every read; persists a new longest streak.
async fn get_streak(State(state): State<Arc<AppState>>) -> ApiResult<StreakInfo> {
    let mut doc = state.metadata.load();
    let (info, changed) = streak_info(&mut doc, today());
    if changed {
        state
            .metadata
            .save(&doc)
            .map_err(on_error("Failed to read streak"))?;
        info!("New longest streak: {}", info.longest_streak);
    }
    Ok(Json(info))
}
