//! # Advisor State
//!
//! Holds the insight service and at most one pending request.
//!
//! A new request replaces (and cancels) the pending one. The pending task
//! owns its own metrics snapshot, so sales can keep arriving while it runs.

use std::sync::{Arc, Mutex, MutexGuard};

use fluir_advisor::{AdvisorConfig, GeminiAdvisor, InsightService, InsightTask, PromptContext};
use fluir_core::{GoalTargets, Metrics};
use tracing::{debug, info, warn};

/// Advisor service plus the in-flight request, if any.
#[derive(Clone)]
pub struct AdvisorState {
    service: InsightService,
    pending: Arc<Mutex<Option<InsightTask>>>,
}

impl AdvisorState {
    pub fn new(service: InsightService) -> Self {
        AdvisorState {
            service,
            pending: Arc::new(Mutex::new(None)),
        }
    }

    /// Builds the service from config. Without an API key the state still
    /// works; every request yields the error fallback.
    pub fn from_config(config: &AdvisorConfig, context: PromptContext) -> Self {
        if !config.has_api_key() {
            info!("No advisor API key configured, insights will show the fallback text");
            return Self::new(InsightService::unconfigured(context));
        }

        let service = match GeminiAdvisor::from_config(config) {
            Ok(advisor) => {
                info!(model = %advisor.model(), "Advisor configured");
                InsightService::new(Arc::new(advisor), context, config.timeout())
            }
            Err(e) => {
                warn!("Advisor disabled: {}", e);
                InsightService::unconfigured(context)
            }
        };
        Self::new(service)
    }

    pub fn service(&self) -> &InsightService {
        &self.service
    }

    fn pending(&self) -> MutexGuard<'_, Option<InsightTask>> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Starts a request for the given snapshot, cancelling any pending one.
    ///
    /// Returns true when an earlier request was replaced.
    pub fn start(&self, metrics: Metrics, targets: GoalTargets) -> bool {
        let task = self.service.spawn(metrics, targets);
        let previous = self.pending().replace(task);

        match previous {
            Some(old) if !old.is_finished() => {
                debug!("Cancelling superseded advisor request");
                old.cancel();
                true
            }
            _ => false,
        }
    }

    /// Removes and returns the pending request.
    pub fn take(&self) -> Option<InsightTask> {
        self.pending().take()
    }

    /// Cancels the pending request. Returns false if there was none.
    pub fn cancel(&self) -> bool {
        match self.take() {
            Some(task) => {
                task.cancel();
                true
            }
            None => false,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending().is_some()
    }

    /// True while a request is pending and not yet finished.
    pub fn is_running(&self) -> bool {
        self.pending()
            .as_ref()
            .map(|task| !task.is_finished())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fluir_advisor::{Advisor, AdvisorResult};
    use std::time::Duration;

    struct SleepyAdvisor;

    #[async_trait]
    impl Advisor for SleepyAdvisor {
        fn source_name(&self) -> &'static str {
            "sleepy"
        }

        async fn generate(&self, _prompt: &str) -> AdvisorResult<String> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("pronto".to_string())
        }
    }

    fn state() -> AdvisorState {
        AdvisorState::new(InsightService::new(
            Arc::new(SleepyAdvisor),
            PromptContext::default(),
            Duration::from_secs(30),
        ))
    }

    #[test]
    fn test_from_config_without_key_is_unconfigured() {
        let state = AdvisorState::from_config(&AdvisorConfig::default(), PromptContext::default());
        assert!(!state.service().is_configured());
        assert!(!state.has_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_replaces_running_request() {
        let state = state();

        assert!(!state.start(Metrics::default(), GoalTargets::default()));
        assert!(state.is_running());
        assert!(state.start(Metrics::default(), GoalTargets::default()));

        let task = state.take().unwrap();
        assert!(!state.has_pending());
        assert_eq!(task.wait().await.unwrap().text(), "pronto");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_pending_request() {
        let state = state();
        assert!(!state.cancel());

        state.start(Metrics::default(), GoalTargets::default());
        let handle = state.clone();
        assert!(handle.cancel());
        assert!(!state.has_pending());
        assert!(!state.is_running());
    }

    #[tokio::test]
    async fn test_finished_request_is_not_reported_as_replaced() {
        let state = AdvisorState::new(InsightService::unconfigured(PromptContext::default()));
        state.start(Metrics::default(), GoalTargets::default());

        while state.is_running() {
            tokio::task::yield_now().await;
        }

        assert!(!state.start(Metrics::default(), GoalTargets::default()));
        let insight = state.take().unwrap().wait().await.unwrap();
        assert!(insight.is_fallback());
    }
}
