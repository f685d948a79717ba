//! # Advisor Commands
//!
//! Business insights run as a background task. Starting a request snapshots
//! the metrics and targets, so the ledger stays editable while it runs.
//!
//! ```text
//! request_insights ──► pending ──┬──► await_insights ──► Insight
//!                                └──► cancel_insights ─► (dropped)
//! ```

use chrono::{DateTime, FixedOffset};
use fluir_advisor::Insight;
use fluir_core::derive_metrics;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{AdvisorState, DashboardState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestInsightsResponse {
    /// An earlier pending request was cancelled in favour of this one.
    pub replaced_pending: bool,
    /// False when no API key is configured; the result will be the fallback text.
    pub advisor_configured: bool,
}

/// Starts an insights request for the current ledger and targets.
///
/// Must be called from within a tokio runtime.
pub fn request_insights(
    dashboard: &DashboardState,
    advisor: &AdvisorState,
    now: &DateTime<FixedOffset>,
) -> RequestInsightsResponse {
    debug!("request_insights command");

    let (metrics, targets) =
        dashboard.with_dashboard(|d| (derive_metrics(d.ledger.all(), now), d.targets));
    let replaced_pending = advisor.start(metrics, targets);

    info!(replaced_pending, "Advisor request started");
    RequestInsightsResponse {
        replaced_pending,
        advisor_configured: advisor.service().is_configured(),
    }
}

/// Waits for the pending request.
pub async fn await_insights(advisor: &AdvisorState) -> Result<Insight, ApiError> {
    debug!("await_insights command");
    let task = advisor
        .take()
        .ok_or_else(|| ApiError::not_found("No advisor request is pending"))?;

    let insight = task.wait().await?;
    debug!(fallback = insight.is_fallback(), "Advisor request finished");
    Ok(insight)
}

/// Cancels the pending request. Returns false if there was none.
pub fn cancel_insights(advisor: &AdvisorState) -> bool {
    debug!("cancel_insights command");
    let cancelled = advisor.cancel();
    if cancelled {
        info!("Advisor request cancelled");
    }
    cancelled
}

/// Runs an insights call to completion in the foreground.
pub async fn get_business_insights(
    dashboard: &DashboardState,
    advisor: &AdvisorState,
    now: &DateTime<FixedOffset>,
) -> Insight {
    debug!("get_business_insights command");
    let (metrics, targets) =
        dashboard.with_dashboard(|d| (derive_metrics(d.ledger.all(), now), d.targets));
    advisor
        .service()
        .get_business_insights(&metrics, &targets)
        .await
}
