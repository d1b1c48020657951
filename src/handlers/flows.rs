//! Flows handler

use axum::{extract::State, Json};

use crate::AppState;
use crate::flows::FlowRecord;

/// Last classification result
pub async fn list(State(state): State<AppState>) -> Json<Vec<FlowRecord>> {
    Json(state.last_flows.read().clone())
}
