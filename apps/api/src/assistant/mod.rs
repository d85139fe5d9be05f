// Job-search chat assistant: a single-turn endpoint that wraps the user's
// question in the job-search prompt and forwards it to the Sonar endpoint.

pub mod handlers;
pub mod prompts;
