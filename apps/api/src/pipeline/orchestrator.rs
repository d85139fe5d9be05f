//! Fixed-order pipeline execution.
//!
//! Validation is fail-fast: a missing credential or missing required field
//! aborts before any stage runs. Once running, a stage that fails remotely is
//! recorded as its marker-prefixed error text and the pipeline continues —
//! one stage's failure can never block or corrupt another's execution.

use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::pipeline::prompts::{build_prompt, chain_writing_prompt, PromptFields};
use crate::pipeline::stage::{Industry, PipelineOutcome, Stage};
use crate::sonar_client::{SamplingConfig, SonarClient};

/// One CV submission. Immutable for the duration of a run; the API key is
/// supplied per request and never stored server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineRequest {
    pub cv_text: String,
    pub target_role: String,
    pub industry: Industry,
    pub api_key: String,
    /// When true, the writing prompt is suffixed with the analysis, research,
    /// and optimization outputs. Defaults to independent prompts.
    #[serde(default)]
    pub chain_outputs: bool,
}

impl PipelineRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.api_key.trim().is_empty() {
            return Err(AppError::Validation(
                "a Perplexity API key is required".to_string(),
            ));
        }
        if self.cv_text.trim().is_empty() {
            return Err(AppError::Validation(
                "cv_text is required; upload a CV or paste its text".to_string(),
            ));
        }
        if self.target_role.trim().is_empty() {
            return Err(AppError::Validation(
                "target_role is required".to_string(),
            ));
        }
        Ok(())
    }

    fn fields(&self) -> PromptFields<'_> {
        PromptFields {
            cv_text: &self.cv_text,
            target_role: &self.target_role,
            industry: self.industry,
        }
    }
}

/// Per-stage sampling parameters. Configuration data taken from the original
/// tool definitions, not inferred intent.
pub fn sampling_for(stage: Stage) -> SamplingConfig {
    match stage {
        Stage::Analysis | Stage::Writing => SamplingConfig::DEFAULT,
        Stage::Research | Stage::Optimization => SamplingConfig::FOCUSED,
    }
}

/// Runs all four stages in order and returns exactly four results.
pub async fn run_pipeline(
    sonar: &SonarClient,
    request: &PipelineRequest,
) -> Result<PipelineOutcome, AppError> {
    request.validate()?;

    let mut outcome = PipelineOutcome::default();
    for stage in Stage::ALL {
        let prompt = build_prompt(stage, &request.fields())?;
        let user = if stage == Stage::Writing && request.chain_outputs {
            chain_writing_prompt(&prompt.user, &outcome)
        } else {
            prompt.user
        };

        info!(%stage, "running pipeline stage");
        let completion = sonar
            .complete(&request.api_key, prompt.system, &user, sampling_for(stage))
            .await;
        if completion.is_failed() {
            warn!(%stage, "stage degraded, recording error text and continuing");
        }
        outcome.record(stage, completion.into_text());
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PipelineRequest {
        PipelineRequest {
            cv_text: "Jane Doe, 5 years SQL/Python...".to_string(),
            target_role: "Senior Data Engineer".to_string(),
            industry: Industry::Technology,
            api_key: "valid-key".to_string(),
            chain_outputs: false,
        }
    }

    #[test]
    fn test_validate_accepts_complete_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_key_cv_and_role() {
        let mut no_key = request();
        no_key.api_key.clear();
        assert!(matches!(
            no_key.validate().unwrap_err(),
            AppError::Validation(_)
        ));

        let mut no_cv = request();
        no_cv.cv_text = "   ".to_string();
        assert!(no_cv.validate().is_err());

        let mut no_role = request();
        no_role.target_role.clear();
        assert!(no_role.validate().is_err());
    }

    #[test]
    fn test_chain_outputs_defaults_to_false() {
        let parsed: PipelineRequest = serde_json::from_str(
            r#"{
                "cv_text": "cv",
                "target_role": "role",
                "industry": "Finance",
                "api_key": "k"
            }"#,
        )
        .unwrap();
        assert!(!parsed.chain_outputs);
        assert_eq!(parsed.industry, Industry::Finance);
    }

    #[test]
    fn test_sampling_values_per_stage() {
        assert_eq!(sampling_for(Stage::Analysis).max_tokens, 2000);
        assert_eq!(sampling_for(Stage::Writing).max_tokens, 2000);
        assert_eq!(sampling_for(Stage::Research).max_tokens, 1500);
        assert_eq!(sampling_for(Stage::Optimization).max_tokens, 1500);
        assert!(sampling_for(Stage::Research).top_p.is_none());
        assert_eq!(sampling_for(Stage::Analysis).top_p, Some(0.9));
    }
}
