//! Sonar client — the single point of entry for all hosted completion calls.
//!
//! ARCHITECTURAL RULE: No other module may call the Perplexity API directly.
//! All completion requests MUST go through this module.
//!
//! The client never returns an error to its callers: every failure mode —
//! missing credential, transport failure, non-2xx status, malformed body — is
//! converted into a `Completion::Failed` text so call sites always receive
//! something renderable. There is no retry: one request per call.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// The model used for all completion calls.
/// Intentionally hardcoded to prevent accidental drift.
pub const SONAR_MODEL: &str = "sonar";

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// Fixed prefix for converted remote failures. Callers (and tests) detect a
/// degraded stage by this marker.
pub const ERROR_MARKER: &str = "[error]";

/// Returned verbatim when no API key was supplied; no network call is made.
pub const MISSING_KEY_PROMPT: &str =
    "Please provide a Perplexity API key to use the CV enhancement service.";

/// Sampling parameters for a single completion call. Values differ per
/// pipeline stage; they are configuration data, not inferred behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplingConfig {
    pub max_tokens: u32,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
}

impl SamplingConfig {
    /// Shared default: used by the analysis and writing stages.
    pub const DEFAULT: SamplingConfig = SamplingConfig {
        max_tokens: 2000,
        temperature: 0.3,
        top_p: Some(0.9),
    };

    /// Tighter sampling used by the research and optimization stages.
    pub const FOCUSED: SamplingConfig = SamplingConfig {
        max_tokens: 1500,
        temperature: 0.2,
        top_p: None,
    };
}

/// Tagged outcome of a completion call: real content or renderable error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Content(String),
    Failed(String),
}

impl Completion {
    pub fn into_text(self) -> String {
        match self {
            Completion::Content(text) | Completion::Failed(text) => text,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Completion::Failed(_))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// The single completion client used by all services in cvlift.
#[derive(Clone)]
pub struct SonarClient {
    client: reqwest::Client,
    base_url: String,
}

impl SonarClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.into(),
        }
    }

    /// Sends a single two-message (system + user) chat completion request and
    /// returns the first choice's text, or converted failure text.
    pub async fn complete(
        &self,
        api_key: &str,
        system: &str,
        user: &str,
        sampling: SamplingConfig,
    ) -> Completion {
        if api_key.trim().is_empty() {
            return Completion::Failed(MISSING_KEY_PROMPT.to_string());
        }

        let request_body = ChatRequest {
            model: SONAR_MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            max_tokens: sampling.max_tokens,
            temperature: sampling.temperature,
            top_p: sampling.top_p,
        };

        let url = format!("{}{}", self.base_url, CHAT_COMPLETIONS_PATH);

        let response = match self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!("Sonar request failed: {e}");
                return failed(format!("request failed: {e}"));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Prefer the structured API message when the body parses
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!("Sonar API returned {status}: {message}");
            return failed(format!("API returned status {}: {message}", status.as_u16()));
        }

        let parsed: ChatResponse = match response.json().await {
            Ok(p) => p,
            Err(e) => {
                warn!("Sonar response body was malformed: {e}");
                return failed(format!("malformed response body: {e}"));
            }
        };

        match parsed.choices.into_iter().next() {
            Some(choice) if !choice.message.content.is_empty() => {
                debug!("Sonar call succeeded ({} bytes)", choice.message.content.len());
                Completion::Content(choice.message.content)
            }
            _ => failed("response contained no choices".to_string()),
        }
    }
}

fn failed(detail: String) -> Completion {
    Completion::Failed(format!("{ERROR_MARKER} {detail}"))
}
