//! Story routes — reading-practice collection.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};

use crate::error::{on_error, ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::state::AppState;
use chunkradar_store::{Story, StoryInput};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stories", get(list_stories).post(create_story))
        .route("/stories/{id}", put(update_story).delete(delete_story))
}

fn parse_story_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::not_found("Story not found"))
}

async fn list_stories(State(state): State<Arc<AppState>>) -> Json<Vec<Story>> {
    Json(state.stories.list())
}

async fn create_story(
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<StoryInput>,
) -> ApiResult<Story> {
    let story = state
        .stories
        .create(input)
        .map_err(on_error("Failed to create story"))?;
    Ok(Json(story))
}

async fn update_story(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<StoryInput>,
) -> ApiResult<Story> {
    let id = parse_story_id(&id)?;
    let story = state
        .stories
        .update(id, input)
        .map_err(on_error("Failed to update story"))?;
    Ok(Json(story))
}

async fn delete_story(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<serde_json::Value> {
    let id = parse_story_id(&id)?;
    state
        .stories
        .delete(id)
        .map_err(on_error("Failed to delete story"))?;
    Ok(Json(serde_json::json!({ "success": true })))
}
