//! # Insight Service
//!
//! Wraps an [`Advisor`] with a timeout, a cancellable background task and
//! the fallback texts the dashboard shows when anything goes wrong.
//!
//! ## Call Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  spawn(metrics, targets) ──► InsightTask (pending)                      │
//! │                                  │                                      │
//! │            ┌─────────────────────┼──────────────────────┐               │
//! │            ▼                     ▼                      ▼               │
//! │       text returned         empty / error           cancel()            │
//! │            │                     │                      │               │
//! │            ▼                     ▼                      ▼               │
//! │   Insight::Generated     Insight::Fallback      AdvisorError::Cancelled │
//! │                                                                         │
//! │  The task owns a snapshot of the metrics. The ledger stays free to      │
//! │  change while it runs.                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use fluir_core::{GoalTargets, Metrics};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::client::Advisor;
use crate::error::{AdvisorError, AdvisorResult};
use crate::prompt::{build_prompt, PromptContext};

/// Shown when the model answers with no text.
pub const EMPTY_RESPONSE_TEXT: &str = "Não foi possível gerar insights no momento.";

/// Shown on any transport, API or configuration failure.
pub const ERROR_RESPONSE_TEXT: &str =
    "Erro ao conectar com a IA. Verifique se você configurou a chave de API (FLUIR_API_KEY) nas configurações do projeto.";

// =============================================================================
// Insight Result
// =============================================================================

/// What the advisor panel displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Insight {
    /// Text produced by the model.
    Generated(String),
    /// Fixed fallback text after a failure or an empty answer.
    Fallback(String),
}

impl Insight {
    pub fn text(&self) -> &str {
        match self {
            Insight::Generated(text) | Insight::Fallback(text) => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Insight::Fallback(_))
    }

    /// Maps a raw advisor outcome onto display text.
    pub fn from_result(result: AdvisorResult<String>) -> Self {
        match result {
            Ok(text) => Insight::Generated(text),
            Err(AdvisorError::EmptyResponse) => Insight::Fallback(EMPTY_RESPONSE_TEXT.to_string()),
            Err(_) => Insight::Fallback(ERROR_RESPONSE_TEXT.to_string()),
        }
    }
}

// =============================================================================
// Service
// =============================================================================

/// Asks an advisor for insights about a metrics snapshot.
#[derive(Clone)]
pub struct InsightService {
    advisor: Option<Arc<dyn Advisor>>,
    context: PromptContext,
    timeout: Duration,
}

impl InsightService {
    pub fn new(advisor: Arc<dyn Advisor>, context: PromptContext, timeout: Duration) -> Self {
        InsightService {
            advisor: Some(advisor),
            context,
            timeout,
        }
    }

    /// A service with no backend. Every call reports a missing API key.
    pub fn unconfigured(context: PromptContext) -> Self {
        InsightService {
            advisor: None,
            context,
            timeout: Duration::from_secs(1),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.advisor.is_some()
    }

    /// Runs one advisor call and returns the raw outcome.
    ///
    /// Whitespace-only text counts as [`AdvisorError::EmptyResponse`].
    pub async fn request(&self, metrics: &Metrics, targets: &GoalTargets) -> AdvisorResult<String> {
        let advisor = self.advisor.as_ref().ok_or(AdvisorError::MissingApiKey)?;
        let prompt = build_prompt(metrics, targets, &self.context);

        let text = tokio::time::timeout(self.timeout, advisor.generate(&prompt))
            .await
            .map_err(|_| AdvisorError::Timeout(self.timeout.as_secs()))??;

        if text.trim().is_empty() {
            return Err(AdvisorError::EmptyResponse);
        }
        Ok(text)
    }

    /// Runs one advisor call and always returns something displayable.
    pub async fn get_business_insights(&self, metrics: &Metrics, targets: &GoalTargets) -> Insight {
        let result = self.request(metrics, targets).await;

        match &result {
            Ok(text) => info!(chars = text.chars().count(), "Advisor insights generated"),
            Err(AdvisorError::EmptyResponse) => warn!("Advisor returned an empty response"),
            Err(e) if e.is_config_error() => error!(error = %e, "Advisor is misconfigured"),
            Err(e) => error!(error = %e, retryable = e.is_retryable(), "Advisor call failed"),
        }

        Insight::from_result(result)
    }

    /// Starts the call in the background and returns a handle to it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(&self, metrics: Metrics, targets: GoalTargets) -> InsightTask {
        let service = self.clone();
        let handle = tokio::spawn(async move { service.get_business_insights(&metrics, &targets).await });
        InsightTask { handle }
    }
}

// =============================================================================
// Background Task
// =============================================================================

/// A pending insights call.
#[derive(Debug)]
pub struct InsightTask {
    handle: JoinHandle<Insight>,
}

impl InsightTask {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Aborts the call. A later [`InsightTask::wait`] reports `Cancelled`.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Waits for the call to finish.
    pub async fn wait(self) -> AdvisorResult<Insight> {
        match self.handle.await {
            Ok(insight) => Ok(insight),
            Err(e) if e.is_cancelled() => Err(AdvisorError::Cancelled),
            Err(e) => Err(AdvisorError::RequestFailed(format!("advisor task failed: {}", e))),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
