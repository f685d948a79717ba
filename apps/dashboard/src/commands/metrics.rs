//! # Metrics Commands
//!
//! Read-only views derived from the ledger at a given instant.

use chrono::{DateTime, FixedOffset};
use fluir_core::{
    daily_revenue, derive_metrics, simulate_goal, CategoryRevenue, DailyRevenue, GoalPeriod,
    GoalState, GoalTargets, Metrics, ProductSummary, TOP_PRODUCTS_CHART_LEN,
};
use serde::Serialize;
use tracing::debug;

use crate::state::DashboardState;

/// Everything the dashboard screen renders in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub metrics: Metrics,
    /// First products by revenue (bar chart).
    pub top_products: Vec<ProductSummary>,
    /// Principal vs Secondary revenue (pie chart), empty categories omitted.
    pub category_breakdown: Vec<CategoryRevenue>,
    /// Revenue per day, oldest first (line chart).
    pub timeline: Vec<DailyRevenue>,
    pub targets: GoalTargets,
    pub monthly_goal: GoalState,
    pub annual_goal: GoalState,
    pub has_data_to_reset: bool,
}

/// Derives the metrics snapshot.
pub fn get_metrics(state: &DashboardState, now: &DateTime<FixedOffset>) -> Metrics {
    debug!(%now, "get_metrics command");
    state.with_dashboard(|d| derive_metrics(d.ledger.all(), now))
}

/// Derives the full dashboard view under a single lock, so every panel
/// reflects the same ledger.
pub fn get_dashboard(state: &DashboardState, now: &DateTime<FixedOffset>) -> DashboardView {
    debug!(%now, "get_dashboard command");

    state.with_dashboard(|d| {
        let metrics = derive_metrics(d.ledger.all(), now);
        let timeline = daily_revenue(d.ledger.all(), &now.timezone());

        DashboardView {
            top_products: metrics.top_products(TOP_PRODUCTS_CHART_LEN).to_vec(),
            category_breakdown: metrics.category_breakdown(),
            timeline,
            targets: d.targets,
            monthly_goal: simulate_goal(&metrics, GoalPeriod::Monthly, d.targets.monthly),
            annual_goal: simulate_goal(&metrics, GoalPeriod::Annual, d.targets.annual),
            has_data_to_reset: d.has_data_to_reset(),
            metrics,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fluir_core::{Money, ProductCategory};

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2026-06-15T12:00:00-03:00").unwrap()
    }

    fn seed(state: &DashboardState) {
        let at = |s: &str| DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc);
        state.with_dashboard_mut(|d| {
            let entries = [
                ("Consultoria", 150_000, 2, "2026-06-10T12:00:00-03:00"),
                ("Curso", 20_000, 5, "2026-06-11T12:00:00-03:00"),
                ("Ebook", 5_000, 4, "2026-03-02T12:00:00-03:00"),
                ("Consultoria", 150_000, 1, "2025-11-20T12:00:00-03:00"),
            ];
            for (name, cents, qty, ts) in entries {
                d.ledger
                    .append_at(name, Money::from_cents(cents), qty, at(ts))
                    .unwrap();
            }
        });
    }

    #[test]
    fn test_get_metrics() {
        let state = DashboardState::default();
        seed(&state);

        let metrics = get_metrics(&state, &now());
        assert_eq!(metrics.total_sales_count, 4);
        assert_eq!(metrics.total_revenue, Money::from_cents(570_000));
        assert_eq!(metrics.monthly_revenue, Money::from_cents(400_000));
        assert_eq!(metrics.annual_revenue, Money::from_cents(420_000));
        assert_eq!(metrics.products[0].name, "Consultoria");
    }

    #[test]
    fn test_get_dashboard() {
        let state = DashboardState::default();
        seed(&state);

        let view = get_dashboard(&state, &now());

        assert_eq!(view.top_products.len(), 3);
        assert_eq!(view.category_breakdown.len(), 2);
        assert_eq!(view.category_breakdown[0].category, ProductCategory::Principal);
        assert_eq!(view.timeline.len(), 4);
        assert_eq!(view.monthly_goal.revenue_gap, Money::from_cents(600_000));
        assert_eq!(view.monthly_goal.progress_percent, 40.0);
        assert_eq!(view.annual_goal.current_revenue, Money::from_cents(420_000));
        assert_eq!(view.monthly_goal.top_product_name.as_deref(), Some("Consultoria"));
        assert!(view.has_data_to_reset);
    }

    #[test]
    fn test_empty_dashboard() {
        let view = get_dashboard(&DashboardState::default(), &now());
        assert!(view.top_products.is_empty());
        assert!(view.category_breakdown.is_empty());
        assert!(view.timeline.is_empty());
        assert_eq!(view.monthly_goal.progress_percent, 0.0);
        assert!(!view.has_data_to_reset);
    }
}
