//! Group routes — list, create, rename, delete.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::{on_error, ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::state::AppState;
use chunkradar_store::Group;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/groups", get(list_groups).post(create_group))
        .route("/groups/{id}", put(update_group).delete(delete_group))
}

#[derive(Deserialize)]
struct GroupBody {
    #[serde(default)]
    name: Option<String>,
}

impl GroupBody {
    fn name(self) -> Result<String, ApiError> {
        match self.name {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(ApiError::bad_request("Name is required")),
        }
    }
}

/// GET /api/groups
async fn list_groups(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Group>> {
    let groups = state
        .catalog
        .list_groups()
        .map_err(on_error("Failed to read metadata"))?;
    Ok(Json(groups))
}

/// POST /api/groups — `{name}`.
async fn create_group(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<GroupBody>,
) -> ApiResult<Group> {
    let name = body.name()?;
    let group = state
        .catalog
        .create_group(&name)
        .map_err(on_error("Failed to create group"))?;
    Ok(Json(group))
}

/// PUT /api/groups/:id — `{name}`.
async fn update_group(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<GroupBody>,
) -> ApiResult<Group> {
    let name = body.name()?;
    let group = state
        .catalog
        .rename_group(&id, &name)
        .map_err(on_error("Failed to update group"))?;
    Ok(Json(group))
}

/// DELETE /api/groups/:id — the default group's chunk file is kept;
/// progress and confidence entries are retained.
async fn delete_group(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<serde_json::Value> {
    let deleted = state
        .catalog
        .delete_group(&id)
        .map_err(on_error("Failed to delete group"))?;
    Ok(Json(serde_json::json!({
        "success": true,
        "fileRemoved": deleted.file_removed,
    })))
}
