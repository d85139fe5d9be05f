//! Axum route handler for the job-search assistant.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::assistant::prompts::{build_job_search_prompt, JOB_SEARCH_SAMPLING, JOB_SEARCH_SYSTEM};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub question: String,
    pub api_key: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /api/v1/assistant/chat
///
/// Forwards the question to the Sonar endpoint wrapped in the job-search
/// prompt. The reply is always renderable text: remote failures and a
/// missing API key come back as the client's converted text, never as an
/// HTTP error.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }

    let prompt = build_job_search_prompt(&request.question);
    let reply = state
        .sonar
        .complete(
            &request.api_key,
            JOB_SEARCH_SYSTEM,
            &prompt,
            JOB_SEARCH_SAMPLING,
        )
        .await
        .into_text();

    Ok(Json(ChatResponse { reply }))
}
