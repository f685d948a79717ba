//! # Goal Commands
//!
//! Goal simulation, target editing and the dashboard reset.

use chrono::{DateTime, FixedOffset};
use fluir_core::{derive_metrics, simulate_goal, GoalPeriod, GoalState, GoalTargets, Money};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::DashboardState;

/// Simulates the goal for `period` against its current target.
pub fn get_goal(state: &DashboardState, period: GoalPeriod, now: &DateTime<FixedOffset>) -> GoalState {
    debug!(%period, "get_goal command");
    state.with_dashboard(|d| {
        let metrics = derive_metrics(d.ledger.all(), now);
        simulate_goal(&metrics, period, d.targets.get(period))
    })
}

/// Simulates a target without storing it ("what if my goal were X?").
pub fn preview_goal(
    state: &DashboardState,
    period: GoalPeriod,
    target: &str,
    now: &DateTime<FixedOffset>,
) -> Result<GoalState, ApiError> {
    debug!(%period, input = target, "preview_goal command");
    let target: Money = target.parse()?;
    if target.is_negative() {
        return Err(fluir_core::CoreError::NegativeTarget(target.to_string()).into());
    }

    Ok(state.with_dashboard(|d| {
        let metrics = derive_metrics(d.ledger.all(), now);
        simulate_goal(&metrics, period, target)
    }))
}

/// Stores a new target for `period`. Zero is accepted.
pub fn set_target(state: &DashboardState, period: GoalPeriod, target: &str) -> Result<GoalTargets, ApiError> {
    debug!(%period, input = target, "set_target command");
    let target: Money = target.parse()?;

    let targets = state.with_dashboard_mut(|d| {
        d.targets.set(period, target)?;
        Ok::<_, fluir_core::CoreError>(d.targets)
    })?;

    info!(%period, %target, "Goal target updated");
    Ok(targets)
}

/// Result of a reset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetResponse {
    pub cleared_sales: usize,
    pub targets: GoalTargets,
}

/// Whether the reset button should be enabled.
pub fn has_data_to_reset(state: &DashboardState) -> bool {
    state.with_dashboard(|d| d.has_data_to_reset())
}

/// Clears every sale and restores the default targets.
///
/// Confirmation is the caller's job; this always resets.
pub fn reset_dashboard(state: &DashboardState) -> ResetResponse {
    debug!("reset_dashboard command");
    let response = state.with_dashboard_mut(|d| {
        let cleared_sales = d.ledger.len();
        d.reset();
        ResetResponse {
            cleared_sales,
            targets: d.targets,
        }
    });

    info!(cleared_sales = response.cleared_sales, "Dashboard reset");
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use fluir_core::GoalStatus;

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2026-06-15T12:00:00-03:00").unwrap()
    }

    fn state_with_monthly_revenue(cents: i64) -> DashboardState {
        let state = DashboardState::default();
        let at = now().with_timezone(&chrono::Utc);
        state.with_dashboard_mut(|d| {
            d.ledger
                .append_at("Consultoria", Money::from_cents(cents), 1, at)
                .unwrap();
        });
        state
    }

    #[test]
    fn test_get_goal_uses_stored_target() {
        let state = state_with_monthly_revenue(650_000);

        let goal = get_goal(&state, GoalPeriod::Monthly, &now());
        assert_eq!(goal.target, Money::from_major(10_000));
        assert_eq!(goal.revenue_gap, Money::from_major(3_500));
        assert_eq!(goal.progress_percent, 65.0);
        assert_eq!(goal.status, GoalStatus::InProgress);
    }

    #[test]
    fn test_set_target_then_goal_met() {
        let state = state_with_monthly_revenue(500_000);

        let targets = set_target(&state, GoalPeriod::Monthly, "5000").unwrap();
        assert_eq!(targets.monthly, Money::from_major(5_000));

        let goal = get_goal(&state, GoalPeriod::Monthly, &now());
        assert_eq!(goal.revenue_gap, Money::zero());
        assert!(goal.is_met());
    }

    #[test]
    fn test_set_target_rejects_negative_and_garbage() {
        let state = DashboardState::default();

        let err = set_target(&state, GoalPeriod::Annual, "-1").unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);

        let err = set_target(&state, GoalPeriod::Annual, "lots").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert!(!has_data_to_reset(&state));
    }

    #[test]
    fn test_preview_does_not_store() {
        let state = state_with_monthly_revenue(100_000);
        let goal = preview_goal(&state, GoalPeriod::Monthly, "2000", &now()).unwrap();
        assert_eq!(goal.progress_percent, 50.0);

        let stored = get_goal(&state, GoalPeriod::Monthly, &now());
        assert_eq!(stored.target, Money::from_major(10_000));
    }

    #[test]
    fn test_reset_dashboard() {
        let state = state_with_monthly_revenue(100_000);
        set_target(&state, GoalPeriod::Monthly, "1").unwrap();
        assert!(has_data_to_reset(&state));

        let response = reset_dashboard(&state);
        assert_eq!(response.cleared_sales, 1);
        assert_eq!(response.targets, GoalTargets::default());
        assert!(!has_data_to_reset(&state));

        let goal = get_goal(&state, GoalPeriod::Monthly, &now());
        assert_eq!(goal.current_revenue, Money::zero());
    }
}
