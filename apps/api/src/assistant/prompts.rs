//! Prompt constants for the job-search assistant.

use crate::sonar_client::SamplingConfig;

pub const JOB_SEARCH_SYSTEM: &str = "You are a specialized job search assistant focused on \
    data engineering roles. Provide accurate, up-to-date job information with proper \
    citations and sources.";

/// Job-search prompt. Replace `{query}` before sending.
pub const JOB_SEARCH_PROMPT_TEMPLATE: &str = r#"Find current data engineer job opportunities related to: {query}

Please provide:
- Job titles and companies
- Required skills and technologies
- Salary ranges (if available)
- Location information
- Application links or contact information
- Recent posting dates

Focus on legitimate job postings from reputable sources like LinkedIn, Indeed, Glassdoor, company websites, etc."#;

pub const JOB_SEARCH_SAMPLING: SamplingConfig = SamplingConfig {
    max_tokens: 1500,
    temperature: 0.2,
    top_p: Some(0.9),
};

pub fn build_job_search_prompt(query: &str) -> String {
    JOB_SEARCH_PROMPT_TEMPLATE.replace("{query}", query)
}
