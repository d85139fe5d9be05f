// CV enhancement pipeline: four fixed stages run strictly in order
// (Analysis → Research → Optimization → Writing), each an independent prompt
// against the Sonar endpoint. All LLM calls go through sonar_client — no
// direct API calls here.

pub mod handlers;
pub mod orchestrator;
pub mod presenter;
pub mod prompts;
pub mod stage;
