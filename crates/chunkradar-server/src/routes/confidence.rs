//! Confidence routes — spaced-repetition levels.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::{on_error, ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::state::AppState;
use chunkradar_core::time::today;
use chunkradar_store::{ConfidenceMap, ConfidenceRecord};
use chunkradar_study::confidence::apply_answer;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/confidence", get(get_all_confidence).post(update_confidence))
        .route("/confidence/{group_id}", get(get_group_confidence))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfidenceBody {
    group_id: Option<String>,
    chunk_id: Option<i64>,
    is_correct: Option<bool>,
}

async fn get_all_confidence(State(state): State<Arc<AppState>>) -> Json<ConfidenceMap> {
    Json(state.metadata.load().confidence)
}

async fn get_group_confidence(
    State(state): State<Arc<AppState>>,
    Path(group_id): Path<String>,
) -> Json<BTreeMap<i64, ConfidenceRecord>> {
    let confidence = state
        .metadata
        .load()
        .confidence
        .remove(&group_id)
        .unwrap_or_default();
    Json(confidence)
}

/// POST /api/confidence — `{groupId, chunkId, isCorrect}`.
async fn update_confidence(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<ConfidenceBody>,
) -> ApiResult<ConfidenceRecord> {
    let (group_id, chunk_id, is_correct) = match (body.group_id, body.chunk_id, body.is_correct) {
        (Some(g), Some(c), Some(ok)) => (g, c, ok),
        _ => {
            return Err(ApiError::bad_request(
                "groupId, chunkId and isCorrect are required",
            ))
        }
    };

    let mut doc = state.metadata.load();
    let record = apply_answer(&mut doc, &group_id, chunk_id, is_correct, today());
    state
        .metadata
        .save(&doc)
        .map_err(on_error("Failed to update confidence"))?;
    Ok(Json(record))
}
