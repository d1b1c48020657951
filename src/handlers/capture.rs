//! Capture handler

use axum::{extract::State, Json};

use crate::{AppState, AppResult};
use crate::handlers::extract::ValidatedJson;
use crate::models::{round_elapsed, CaptureRequest, CaptureResponse};
use crate::pipeline;

/// Run capture → extract → classify and cache the result
pub async fn start_capture(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CaptureRequest>,
) -> AppResult<Json<CaptureResponse>> {
    // Every cycle reuses the same runtime files
    let _guard = state.run_lock.lock().await;

    tracing::info!("Capture requested on {} for {}s", req.interface, req.timespan);
    let report = pipeline::run_cycle(
        state.config.clone(),
        state.artifacts.clone(),
        &req.interface,
        req.timespan,
    )
    .await?;

    let flows = report.records.len();
    *state.last_flows.write() = report.records;

    tracing::info!("Cycle finished: {} flows in {:.2}s", flows, report.elapsed.as_secs_f64());

    Ok(Json(CaptureResponse {
        status: "ok".to_string(),
        elapsed_sec: round_elapsed(report.elapsed.as_secs_f64()),
        flows,
    }))
}
