//! Display grouping and text export of a pipeline outcome.
//!
//! Pure pass-through: the presenter never transforms stage text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pipeline::stage::{PipelineOutcome, Stage};

/// The three supporting stages, grouped for a "details" view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailsView {
    pub analysis: String,
    pub research: String,
    pub optimization: String,
}

/// The final deliverable: the rewritten CV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalView {
    pub improved_cv: String,
}

/// Display view of an outcome: supporting stages under `details`, the
/// writing output under `final_result`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeView {
    pub details: DetailsView,
    pub final_result: FinalView,
}

pub fn view(outcome: &PipelineOutcome) -> OutcomeView {
    let text = |stage| outcome.text_for(stage).unwrap_or_default().to_string();
    OutcomeView {
        details: DetailsView {
            analysis: text(Stage::Analysis),
            research: text(Stage::Research),
            optimization: text(Stage::Optimization),
        },
        final_result: FinalView {
            improved_cv: text(Stage::Writing),
        },
    }
}

/// A downloadable text artifact. `content` is byte-identical to the writing
/// stage's output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportArtifact {
    pub filename: String,
    pub content: String,
}

pub fn export(outcome: &PipelineOutcome) -> ExportArtifact {
    export_at(outcome, Utc::now())
}

/// Builds the export with an explicit timestamp so tests can pin it.
pub fn export_at(outcome: &PipelineOutcome, now: DateTime<Utc>) -> ExportArtifact {
    ExportArtifact {
        filename: format!("improved_cv_{}.txt", now.format("%Y%m%d_%H%M%S")),
        content: outcome
            .text_for(Stage::Writing)
            .unwrap_or_default()
            .to_string(),
    }
}
