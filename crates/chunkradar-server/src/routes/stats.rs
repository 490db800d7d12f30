//! Daily stats routes.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::{on_error, ApiResult};
use crate::extract::ApiJson;
use crate::state::AppState;
use chunkradar_core::time::today;
use chunkradar_store::DayStat;
use chunkradar_study::stats::record_answers;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/stats", get(get_stats).post(post_stats))
}

#[derive(Deserialize)]
struct StatsBody {
    #[serde(default)]
    correct: u32,
    #[serde(default)]
    wrong: u32,
}

/// GET /api/stats — the last 30 days of answer counts.
async fn get_stats(State(state): State<Arc<AppState>>) -> Json<Vec<DayStat>> {
    Json(state.metadata.load().stats)
}

/// POST /api/stats — `{correct, wrong}` added to today's entry.
async fn post_stats(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<StatsBody>,
) -> ApiResult<serde_json::Value> {
    let mut doc = state.metadata.load();
    let entry = record_answers(&mut doc.stats, today(), body.correct, body.wrong);
    state
        .metadata
        .save(&doc)
        .map_err(on_error("Failed to save stats"))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "today": entry,
    })))
}
