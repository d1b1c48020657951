//! Model status handler

use axum::{extract::State, Json};

use crate::AppState;
use crate::model::ArtifactStatus;

pub async fn status(State(state): State<AppState>) -> Json<ArtifactStatus> {
    Json(state.artifact_status.as_ref().clone())
}
