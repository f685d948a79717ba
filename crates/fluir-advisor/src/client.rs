//! # Advisor Client
//!
//! The [`Advisor`] trait is the seam between the insights service and a
//! concrete language-generation backend. [`GeminiAdvisor`] talks to the
//! Gemini `generateContent` REST endpoint.
//!
//! ```text
//! ┌──────────────┐  prompt  ┌──────────────────┐  POST  ┌──────────────────────────────┐
//! │InsightService│─────────►│  GeminiAdvisor   │───────►│ /v1beta/models/{m}:generate… │
//! │              │◄─────────│  (reqwest)       │◄───────│ candidates[].content.parts[] │
//! └──────────────┘   text   └──────────────────┘  JSON  └──────────────────────────────┘
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AdvisorConfig;
use crate::error::{AdvisorError, AdvisorResult};

/// Pluggable text-generation backend.
#[async_trait]
pub trait Advisor: Send + Sync {
    fn source_name(&self) -> &'static str;

    /// Sends a prompt and returns the generated text (possibly empty).
    async fn generate(&self, prompt: &str) -> AdvisorResult<String>;
}

// =============================================================================
// Gemini Advisor
// =============================================================================

/// Gemini-backed advisor.
///
/// The API key goes in the `x-goog-api-key` header, never in the URL, so it
/// cannot leak into request logs.
#[derive(Clone)]
pub struct GeminiAdvisor {
    api_key: String,
    model: String,
    http: reqwest::Client,
    base_url: String,
}

impl GeminiAdvisor {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_base_url(api_key, model, crate::config::DEFAULT_BASE_URL.to_string())
    }

    pub fn new_with_base_url(api_key: String, model: String, base_url: String) -> Self {
        Self {
            api_key,
            model,
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Builds an advisor from loaded configuration.
    pub fn from_config(config: &AdvisorConfig) -> AdvisorResult<Self> {
        let api_key = config.api_key().ok_or(AdvisorError::MissingApiKey)?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            api_key: api_key.to_string(),
            model: config.api.model.clone(),
            http,
            base_url: config.api.base_url.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl Advisor for GeminiAdvisor {
    fn source_name(&self) -> &'static str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> AdvisorResult<String> {
        let url = self.build_generate_url();
        debug!(model = %self.model, prompt_len = prompt.len(), "Sending generateContent request");

        let resp = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(AdvisorError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        Ok(parsed.text())
    }
}

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_prompt(prompt: &'a str) -> Self {
        GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate; empty if there are none.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Extracts a readable message from an error body, falling back to the raw text.
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => match (envelope.error.status, envelope.error.message) {
            (Some(s), Some(m)) => format!("{} {}", s, m),
            (_, Some(m)) => m,
            (Some(s), None) => s,
            (None, None) => "unknown".to_string(),
        },
        Err(_) if body.trim().is_empty() => "unknown".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
