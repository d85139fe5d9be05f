//! All prompt constants for the CV pipeline, plus the prompt builder.
//!
//! Templates are plain `const` strings with `{field}` placeholders replaced
//! at build time. Construction is deterministic: identical fields always
//! yield byte-identical prompts.

use crate::errors::AppError;
use crate::pipeline::stage::{Industry, Stage};

pub const ANALYSIS_SYSTEM: &str = "You are an expert HR professional and career counselor \
    specializing in CV/Resume analysis and improvement.";

/// Analysis prompt. Replace `{cv_text}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze this CV/Resume and provide detailed feedback:

CV Content:
{cv_text}

Please analyze:
1. Overall structure and formatting
2. Content quality and relevance
3. Missing sections or information
4. Strengths and achievements
5. Areas for improvement
6. ATS (Applicant Tracking System) compatibility
7. Industry-specific recommendations

Provide specific, actionable feedback."#;

pub const RESEARCH_SYSTEM: &str =
    "You are an industry research specialist providing current market insights.";

/// Research prompt. Replace `{target_role}` and `{industry}` before sending.
pub const RESEARCH_PROMPT_TEMPLATE: &str = r#"Research current trends for {target_role} positions in the {industry} industry:

Please provide:
1. Most in-demand skills and technologies
2. Current salary trends
3. Popular job titles and roles
4. Emerging technologies and trends
5. Certification and education requirements
6. Key companies hiring in this field

Focus on actionable insights for CV improvement."#;

pub const OPTIMIZATION_SYSTEM: &str = "You are an ATS optimization specialist helping improve \
    CV keyword density and relevance.";

/// Optimization prompt. Replace `{target_role}` and `{cv_text}` before sending.
pub const OPTIMIZATION_PROMPT_TEMPLATE: &str = r#"Optimize this CV for the role: {target_role}

Current CV:
{cv_text}

Please provide:
1. Key ATS-friendly keywords to include
2. Industry-specific terms and technologies
3. Action verbs and achievement-focused language
4. Skills section optimization
5. Job description alignment suggestions

Focus on maximizing ATS compatibility while maintaining readability."#;

pub const WRITING_SYSTEM: &str = "You are an expert CV writer with a background in \
    professional writing and HR.";

/// Writing prompt. Replace `{target_role}` and `{industry}` before sending.
/// Deliberately does not embed the earlier stages' outputs — see
/// `chain_writing_prompt` for the opt-in chained variant.
pub const WRITING_PROMPT_TEMPLATE: &str = r#"Create an improved version of the CV for a {target_role} position in the {industry} industry. The improved CV should:
1. Address all identified weaknesses
2. Include relevant industry keywords
3. Be ATS-friendly
4. Maintain professional formatting
5. Highlight achievements effectively"#;

/// Input fields a prompt may draw on. All stages share the same source
/// fields; no stage reads another stage's output by default.
#[derive(Debug, Clone, Copy)]
pub struct PromptFields<'a> {
    pub cv_text: &'a str,
    pub target_role: &'a str,
    pub industry: Industry,
}

/// A rendered system/user prompt pair for one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagePrompt {
    pub system: &'static str,
    pub user: String,
}

/// Renders the prompt pair for a stage, failing when a required field is
/// empty: `cv_text` for Analysis/Optimization, `target_role` for
/// Research/Writing.
pub fn build_prompt(stage: Stage, fields: &PromptFields) -> Result<StagePrompt, AppError> {
    match stage {
        Stage::Analysis | Stage::Optimization if fields.cv_text.trim().is_empty() => {
            return Err(AppError::Validation(format!(
                "cv_text is required for the {stage} stage"
            )));
        }
        Stage::Research | Stage::Writing if fields.target_role.trim().is_empty() => {
            return Err(AppError::Validation(format!(
                "target_role is required for the {stage} stage"
            )));
        }
        _ => {}
    }

    let (system, user) = match stage {
        Stage::Analysis => (
            ANALYSIS_SYSTEM,
            ANALYSIS_PROMPT_TEMPLATE.replace("{cv_text}", fields.cv_text),
        ),
        Stage::Research => (
            RESEARCH_SYSTEM,
            RESEARCH_PROMPT_TEMPLATE
                .replace("{target_role}", fields.target_role)
                .replace("{industry}", fields.industry.as_str()),
        ),
        Stage::Optimization => (
            OPTIMIZATION_SYSTEM,
            OPTIMIZATION_PROMPT_TEMPLATE
                .replace("{target_role}", fields.target_role)
                .replace("{cv_text}", fields.cv_text),
        ),
        Stage::Writing => (
            WRITING_SYSTEM,
            WRITING_PROMPT_TEMPLATE
                .replace("{target_role}", fields.target_role)
                .replace("{industry}", fields.industry.as_str()),
        ),
    };

    Ok(StagePrompt { system, user })
}

/// Appends the earlier stages' outputs to a rendered writing prompt.
/// Used only when the caller opts into chained mode.
pub fn chain_writing_prompt(user: &str, outcome: &crate::pipeline::stage::PipelineOutcome) -> String {
    format!(
        "{user}\n\nIncorporate the findings from the earlier stages:\n\n\
         CV ANALYSIS:\n{}\n\n\
         INDUSTRY RESEARCH:\n{}\n\n\
         ATS OPTIMIZATION:\n{}",
        outcome.text_for(Stage::Analysis).unwrap_or_default(),
        outcome.text_for(Stage::Research).unwrap_or_default(),
        outcome.text_for(Stage::Optimization).unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::stage::PipelineOutcome;

    fn fields<'a>() -> PromptFields<'a> {
        PromptFields {
            cv_text: "Jane Doe, 5 years SQL/Python...",
            target_role: "Senior Data Engineer",
            industry: Industry::Technology,
        }
    }

    #[test]
    fn test_build_prompt_is_deterministic_for_every_stage() {
        for stage in Stage::ALL {
            let first = build_prompt(stage, &fields()).unwrap();
            let second = build_prompt(stage, &fields()).unwrap();
            assert_eq!(first, second, "{stage} prompt must be byte-identical");
        }
    }

    #[test]
    fn test_analysis_embeds_cv_text_and_leaves_no_placeholder() {
        let prompt = build_prompt(Stage::Analysis, &fields()).unwrap();
        assert_eq!(prompt.system, ANALYSIS_SYSTEM);
        assert!(prompt.user.contains("Jane Doe, 5 years SQL/Python..."));
        assert!(!prompt.user.contains("{cv_text}"));
    }

    #[test]
    fn test_research_embeds_role_and_industry() {
        let prompt = build_prompt(Stage::Research, &fields()).unwrap();
        assert!(prompt.user.contains("Senior Data Engineer"));
        assert!(prompt.user.contains("Technology"));
        assert!(!prompt.user.contains("{target_role}"));
        assert!(!prompt.user.contains("{industry}"));
    }

    #[test]
    fn test_optimization_embeds_role_and_cv_text() {
        let prompt = build_prompt(Stage::Optimization, &fields()).unwrap();
        assert!(prompt.user.contains("Senior Data Engineer"));
        assert!(prompt.user.contains("Jane Doe, 5 years SQL/Python..."));
    }

    #[test]
    fn test_writing_does_not_embed_cv_text() {
        // The default writing prompt is built from role + industry only.
        let prompt = build_prompt(Stage::Writing, &fields()).unwrap();
        assert!(!prompt.user.contains("Jane Doe"));
        assert!(prompt.user.contains("Senior Data Engineer"));
        assert!(prompt.user.contains("Technology"));
    }

    #[test]
    fn test_missing_cv_text_fails_analysis_and_optimization() {
        let empty_cv = PromptFields {
            cv_text: "  ",
            ..fields()
        };
        for stage in [Stage::Analysis, Stage::Optimization] {
            let err = build_prompt(stage, &empty_cv).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{stage} must fail");
        }
        // Research and writing do not need the CV text.
        assert!(build_prompt(Stage::Research, &empty_cv).is_ok());
        assert!(build_prompt(Stage::Writing, &empty_cv).is_ok());
    }

    #[test]
    fn test_missing_target_role_fails_research_and_writing() {
        let no_role = PromptFields {
            target_role: "",
            ..fields()
        };
        for stage in [Stage::Research, Stage::Writing] {
            let err = build_prompt(stage, &no_role).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{stage} must fail");
        }
        assert!(build_prompt(Stage::Analysis, &no_role).is_ok());
        assert!(build_prompt(Stage::Optimization, &no_role).is_ok());
    }

    #[test]
    fn test_chained_writing_prompt_appends_prior_outputs() {
        let mut outcome = PipelineOutcome::default();
        outcome.record(Stage::Analysis, "analysis says X".to_string());
        outcome.record(Stage::Research, "research says Y".to_string());
        outcome.record(Stage::Optimization, "optimization says Z".to_string());

        let base = build_prompt(Stage::Writing, &fields()).unwrap();
        let chained = chain_writing_prompt(&base.user, &outcome);

        assert!(chained.starts_with(&base.user));
        assert!(chained.contains("analysis says X"));
        assert!(chained.contains("research says Y"));
        assert!(chained.contains("optimization says Z"));
    }
}
