//! Axum route handlers for the CV pipeline API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::pipeline::orchestrator::{run_pipeline, PipelineRequest};
use crate::pipeline::presenter::{self, OutcomeView};
use crate::pipeline::stage::PipelineOutcome;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RunResponse {
    pub outcome: PipelineOutcome,
    pub view: OutcomeView,
}

/// POST /api/v1/pipeline/run
///
/// Validates the submission, runs the four stages in order, and returns the
/// raw outcome plus the grouped display view. Individual stage failures do
/// not fail the request; their error text is part of the outcome.
pub async fn handle_run(
    State(state): State<AppState>,
    Json(request): Json<PipelineRequest>,
) -> Result<Json<RunResponse>, AppError> {
    let outcome = run_pipeline(&state.sonar, &request).await?;
    let view = presenter::view(&outcome);
    Ok(Json(RunResponse { outcome, view }))
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub outcome: PipelineOutcome,
}

/// POST /api/v1/pipeline/export
///
/// Returns the writing stage's text verbatim as a downloadable
/// `improved_cv_<YYYYMMDD_HHMMSS>.txt` attachment.
pub async fn handle_export(Json(request): Json<ExportRequest>) -> Result<Response, AppError> {
    let artifact = presenter::export(&request.outcome);
    let headers = [
        (
            header::CONTENT_TYPE,
            "text/plain; charset=utf-8".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", artifact.filename),
        ),
    ];
    Ok((headers, artifact.content).into_response())
}
