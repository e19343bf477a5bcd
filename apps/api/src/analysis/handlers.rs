//! Axum route handlers for the Analysis API.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::analysis::{run_analysis, AnalysisError};
use crate::errors::AppError;
use crate::models::{parse_gene_list, ViewerKind, SAMPLE_GENE_LIST};
use crate::session::{RunEvent, RunState};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub gene_list: String,
    /// Defaults to every viewer kind when omitted.
    #[serde(default = "all_viewers")]
    pub viewers: Vec<ViewerKind>,
}

fn all_viewers() -> Vec<ViewerKind> {
    ViewerKind::ALL.to_vec()
}

#[derive(Debug, Serialize)]
pub struct ViewerInfo {
    pub id: ViewerKind,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ViewersResponse {
    pub viewers: Vec<ViewerInfo>,
    pub sample_gene_list: &'static str,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/viewers
///
/// Lists the selectable viewer kinds in canonical order plus a sample gene list.
pub async fn handle_list_viewers() -> Json<ViewersResponse> {
    Json(ViewersResponse {
        viewers: ViewerKind::ALL
            .iter()
            .map(|&kind| ViewerInfo {
                id: kind,
                label: kind.label(),
            })
            .collect(),
        sample_gene_list: SAMPLE_GENE_LIST,
    })
}

/// POST /api/v1/analysis
///
/// Starts a run and returns immediately with the `running` snapshot.
/// Poll GET /api/v1/analysis for progress and the finished report.
pub async fn handle_submit_analysis(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<(StatusCode, Json<RunState>), AppError> {
    let run_id = Uuid::new_v4();
    state
        .session
        .dispatch(RunEvent::Started { run_id })
        .map_err(|e| AppError::Conflict(format!("An analysis or export is already in progress ({e})")))?;

    if parse_gene_list(&request.gene_list).is_empty() {
        let err = AnalysisError::EmptyInput;
        if let Err(e) = state.session.dispatch(RunEvent::Aborted(err.to_string())) {
            warn!("Could not record empty-input failure: {e}");
        }
        return Err(err.into());
    }

    info!("Run {run_id} accepted");
    let snapshot = state.session.snapshot();
    tokio::spawn(execute_run(state, request));

    Ok((StatusCode::ACCEPTED, Json(snapshot)))
}

/// GET /api/v1/analysis
///
/// Returns the current run snapshot: idle, running (with progress), succeeded (with
/// report), or failed (with message).
pub async fn handle_get_analysis(State(state): State<AppState>) -> Json<RunState> {
    Json(state.session.snapshot())
}

/// Drives one run to completion and records its outcome in the session.
async fn execute_run(state: AppState, request: AnalysisRequest) {
    let result = run_analysis(
        &request.gene_list,
        &request.viewers,
        state.backend.as_ref(),
        state.pacer.as_ref(),
        &state.session,
    )
    .await;

    let event = match result {
        Ok(report) => RunEvent::Completed(Arc::new(report)),
        Err(e) => {
            error!("Run failed: {e}");
            RunEvent::Aborted(e.to_string())
        }
    };

    if let Err(e) = state.session.dispatch(event) {
        warn!("Run outcome not recorded: {e}");
    }
}
