//! Settings routes — partial update semantics.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::{on_error, ApiResult};
use crate::extract::ApiJson;
use crate::state::AppState;
use chunkradar_store::{Settings, SettingsUpdate};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/settings", get(get_settings).put(update_settings))
}

async fn get_settings(State(state): State<Arc<AppState>>) -> Json<Settings> {
    Json(state.metadata.load().settings)
}

/// PUT /api/settings — only provided fields overwrite.
async fn update_settings(
    State(state): State<Arc<AppState>>,
    ApiJson(update): ApiJson<SettingsUpdate>,
) -> ApiResult<Settings> {
    let mut doc = state.metadata.load();
    doc.settings.apply_update(&update);
    state
        .metadata
        .save(&doc)
        .map_err(on_error("Failed to save settings"))?;
    Ok(Json(doc.settings))
}
