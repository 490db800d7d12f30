//! Chunk routes — list, add, update, delete within a group.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::{on_error, ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::state::AppState;
use chunkradar_store::{Chunk, ChunkUpdate, NewChunk};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chunks", post(create_chunk))
        .route("/chunks/{group_id}", get(list_chunks))
        .route(
            "/chunks/{group_id}/{chunk_id}",
            put(update_chunk).delete(delete_chunk),
        )
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateChunkBody {
    group_id: Option<String>,
    chunk: Option<NewChunk>,
}

#[derive(Deserialize)]
struct UpdateChunkBody {
    chunk: Option<ChunkUpdate>,
}

/// Path ids arrive as strings; anything non-numeric cannot match a chunk.
fn parse_chunk_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::not_found("Chunk not found"))
}

/// GET /api/chunks/:groupId
async fn list_chunks(
    State(state): State<Arc<AppState>>,
    Path(group_id): Path<String>,
) -> ApiResult<Vec<Chunk>> {
    let chunks = state
        .catalog
        .list_chunks(&group_id)
        .map_err(on_error("Failed to read chunks"))?;
    Ok(Json(chunks))
}

/// POST /api/chunks — `{groupId, chunk}`.
async fn create_chunk(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<CreateChunkBody>,
) -> ApiResult<Chunk> {
    let group_id = body
        .group_id
        .ok_or_else(|| ApiError::bad_request("groupId is required"))?;
    let chunk = body
        .chunk
        .ok_or_else(|| ApiError::bad_request("chunk is required"))?;

    let created = state
        .catalog
        .add_chunk(&group_id, chunk)
        .map_err(on_error("Failed to add chunk"))?;
    Ok(Json(created))
}

/// PUT /api/chunks/:groupId/:chunkId — `{chunk}`, shallow merge.
async fn update_chunk(
    State(state): State<Arc<AppState>>,
    Path((group_id, chunk_id)): Path<(String, String)>,
    ApiJson(body): ApiJson<UpdateChunkBody>,
) -> ApiResult<Chunk> {
    let chunk_id = parse_chunk_id(&chunk_id)?;
    let update = body
        .chunk
        .ok_or_else(|| ApiError::bad_request("chunk is required"))?;

    let updated = state
        .catalog
        .update_chunk(&group_id, chunk_id, update)
        .map_err(on_error("Failed to update chunk"))?;
    Ok(Json(updated))
}

/// DELETE /api/chunks/:groupId/:chunkId
async fn delete_chunk(
    State(state): State<Arc<AppState>>,
    Path((group_id, chunk_id)): Path<(String, String)>,
) -> ApiResult<serde_json::Value> {
    let chunk_id = parse_chunk_id(&chunk_id)?;
    state
        .catalog
        .delete_chunk(&group_id, chunk_id)
        .map_err(on_error("Failed to delete chunk"))?;
    Ok(Json(serde_json::json!({ "success": true })))
}
