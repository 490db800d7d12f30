//! Progress routes — per-group chunk statuses.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::{on_error, ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::state::AppState;
use chunkradar_store::{ChunkStatus, ProgressMap};
use chunkradar_study::progress::{group_progress, reset_group, set_status};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/progress", get(get_all_progress).post(save_progress))
        .route(
            "/progress/{group_id}",
            get(get_group_progress).delete(reset_progress),
        )
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgressBody {
    group_id: Option<String>,
    chunk_id: Option<i64>,
    status: Option<String>,
}

async fn get_all_progress(State(state): State<Arc<AppState>>) -> Json<ProgressMap> {
    Json(state.metadata.load().progress)
}

async fn get_group_progress(
    State(state): State<Arc<AppState>>,
    Path(group_id): Path<String>,
) -> Json<BTreeMap<i64, ChunkStatus>> {
    Json(group_progress(&state.metadata.load(), &group_id))
}

/// POST /api/progress — `{groupId, chunkId, status}`.
async fn save_progress(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<ProgressBody>,
) -> ApiResult<serde_json::Value> {
    let (group_id, chunk_id, status) = match (body.group_id, body.chunk_id, body.status) {
        (Some(g), Some(c), Some(s)) => (g, c, s),
        _ => {
            return Err(ApiError::bad_request(
                "groupId, chunkId and status are required",
            ))
        }
    };
    let status = ChunkStatus::parse(&status)
        .ok_or_else(|| ApiError::bad_request(format!("Invalid status: {}", status)))?;

    let mut doc = state.metadata.load();
    set_status(&mut doc, &group_id, chunk_id, status);
    state
        .metadata
        .save(&doc)
        .map_err(on_error("Failed to save progress"))?;

    Ok(Json(serde_json::json!({ "success": true })))
}

/// DELETE /api/progress/:groupId — clears statuses, keeps confidence.
async fn reset_progress(
    State(state): State<Arc<AppState>>,
    Path(group_id): Path<String>,
) -> ApiResult<serde_json::Value> {
    let mut doc = state.metadata.load();
    reset_group(&mut doc, &group_id);
    state
        .metadata
        .save(&doc)
        .map_err(on_error("Failed to reset progress"))?;

    tracing::info!("Reset progress for group {}", group_id);
    Ok(Json(serde_json::json!({ "success": true })))
}
