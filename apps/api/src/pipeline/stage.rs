//! Core pipeline data model: stages, industries, per-stage results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four fixed pipeline steps. The order of `ALL` is the execution
/// order; nothing may reorder, skip, or repeat a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Analysis,
    Research,
    Optimization,
    Writing,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::Analysis,
        Stage::Research,
        Stage::Optimization,
        Stage::Writing,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Analysis => "analysis",
            Stage::Research => "research",
            Stage::Optimization => "optimization",
            Stage::Writing => "writing",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed set of selectable industries, embedded verbatim into the research
/// and writing prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Industry {
    Technology,
    Finance,
    Healthcare,
    Marketing,
    Education,
    Manufacturing,
    Consulting,
    Retail,
    Other,
}

impl Industry {
    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::Technology => "Technology",
            Industry::Finance => "Finance",
            Industry::Healthcare => "Healthcare",
            Industry::Marketing => "Marketing",
            Industry::Education => "Education",
            Industry::Manufacturing => "Manufacturing",
            Industry::Consulting => "Consulting",
            Industry::Retail => "Retail",
            Industry::Other => "Other",
        }
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of a single stage. Never mutated after creation; a degraded stage
/// carries its marker-prefixed error text here like any other output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageResult {
    pub stage: Stage,
    pub output_text: String,
}

/// Ordered collection of stage results. Insertion order equals pipeline
/// order, so serialized outcomes always read Analysis → Writing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOutcome {
    pub results: Vec<StageResult>,
}

impl PipelineOutcome {
    pub fn record(&mut self, stage: Stage, output_text: String) {
        self.results.push(StageResult { stage, output_text });
    }

    pub fn text_for(&self, stage: Stage) -> Option<&str> {
        self.results
            .iter()
            .find(|r| r.stage == stage)
            .map(|r| r.output_text.as_str())
    }
}
