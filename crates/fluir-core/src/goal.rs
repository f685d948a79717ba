//! # Goal Simulator
//!
//! Answers "how far am I from my target, and how many more sales close the
//! gap?" for one goal period.
//!
//! ## Projection Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 simulate_goal(metrics, period, target)                  │
//! │                                                                         │
//! │  current  = metrics.period_revenue(period)                              │
//! │  gap      = max(0, target - current)                                    │
//! │  progress = min(100, current / (target or 1.00) × 100)                  │
//! │                                                                         │
//! │  ┌──────────────────────────┐     ┌──────────────────────────────────┐  │
//! │  │ generic_sales_needed     │     │ top_product_units_needed         │  │
//! │  │ ⌈gap / average_ticket⌉   │     │ ⌈gap / top.avg_unit_price⌉       │  │
//! │  │ (all-time ticket)        │     │ (all-time top product)           │  │
//! │  └──────────────────────────┘     └──────────────────────────────────┘  │
//! │                                                                         │
//! │  gap == 0 ──► GoalStatus::Met      otherwise ──► GoalStatus::InProgress │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both projections divide a period-scoped gap by an all-time figure. The top
//! product in particular is chosen over the whole ledger, not the period.
//!
//! Divisions use exact integer ceilings (`⌈gap × count / revenue⌉`) rather
//! than the rounded `average_ticket`, so a projection never undercounts.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::metrics::Metrics;
use crate::money::{ceil_div, Money, MINOR_UNITS};
use crate::types::GoalPeriod;
use crate::validation::validate_target;

/// Default monthly revenue target (10 000.00).
pub const DEFAULT_MONTHLY_TARGET: Money = Money::from_major(10_000);

/// Default annual revenue target (120 000.00).
pub const DEFAULT_ANNUAL_TARGET: Money = Money::from_major(120_000);

// =============================================================================
// Goal Targets
// =============================================================================

/// User-set revenue targets, one per period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GoalTargets {
    pub monthly: Money,
    pub annual: Money,
}

impl Default for GoalTargets {
    fn default() -> Self {
        GoalTargets {
            monthly: DEFAULT_MONTHLY_TARGET,
            annual: DEFAULT_ANNUAL_TARGET,
        }
    }
}

impl GoalTargets {
    pub fn new(monthly: Money, annual: Money) -> CoreResult<Self> {
        let mut targets = GoalTargets::default();
        targets.set(GoalPeriod::Monthly, monthly)?;
        targets.set(GoalPeriod::Annual, annual)?;
        Ok(targets)
    }

    pub fn get(&self, period: GoalPeriod) -> Money {
        match period {
            GoalPeriod::Monthly => self.monthly,
            GoalPeriod::Annual => self.annual,
        }
    }

    /// Sets one period's target. Zero is accepted; negative is not.
    pub fn set(&mut self, period: GoalPeriod, target: Money) -> CoreResult<()> {
        validate_target(target).map_err(|_| CoreError::NegativeTarget(target.to_string()))?;

        match period {
            GoalPeriod::Monthly => self.monthly = target,
            GoalPeriod::Annual => self.annual = target,
        }
        Ok(())
    }

    /// True when both targets equal `defaults`.
    pub fn matches(&self, defaults: &GoalTargets) -> bool {
        self == defaults
    }
}

// =============================================================================
// Goal State
// =============================================================================

/// Terminal display state of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Met,
    InProgress,
}

/// Everything the goal panel shows for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GoalState {
    pub period: GoalPeriod,
    pub target: Money,
    pub current_revenue: Money,
    /// `max(0, target - current_revenue)`; never clamped by the progress cap.
    pub revenue_gap: Money,
    /// `0.0..=100.0`
    pub progress_percent: f64,
    pub generic_sales_needed: u64,
    pub top_product_name: Option<String>,
    pub top_product_units_needed: u64,
    pub status: GoalStatus,
}

impl GoalState {
    pub fn is_met(&self) -> bool {
        self.status == GoalStatus::Met
    }
}

// =============================================================================
// Simulation
// =============================================================================

/// Computes the goal state for `period` against `target`.
///
/// Total over any target: zero yields full progress once any revenue exists,
/// and a negative target behaves like zero.
///
/// ## Example
/// ```rust
/// use fluir_core::{simulate_goal, GoalPeriod, Metrics, Money};
///
/// let metrics = Metrics {
///     total_revenue: Money::from_major(6_500),
///     total_sales_count: 26,
///     average_ticket: Money::from_major(250),
///     monthly_revenue: Money::from_major(6_500),
///     annual_revenue: Money::from_major(6_500),
///     products: vec![],
/// };
///
/// let goal = simulate_goal(&metrics, GoalPeriod::Monthly, Money::from_major(10_000));
/// assert_eq!(goal.revenue_gap, Money::from_major(3_500));
/// assert_eq!(goal.progress_percent, 65.0);
/// assert_eq!(goal.generic_sales_needed, 14);
/// ```
pub fn simulate_goal(metrics: &Metrics, period: GoalPeriod, target: Money) -> GoalState {
    let current_revenue = metrics.period_revenue(period);
    let revenue_gap = target.shortfall_from(current_revenue);

    let top = metrics.top_product();
    let top_product_units_needed = match top {
        Some(product) if product.total_revenue.is_positive() && revenue_gap.is_positive() => {
            units_to_close(revenue_gap, product.total_quantity, product.total_revenue)
        }
        _ => 0,
    };

    let generic_sales_needed = if metrics.total_sales_count > 0 && metrics.total_revenue.is_positive() {
        units_to_close(
            revenue_gap,
            metrics.total_sales_count as i64,
            metrics.total_revenue,
        )
    } else {
        0
    };

    GoalState {
        period,
        target,
        current_revenue,
        revenue_gap,
        progress_percent: progress_percent(current_revenue, target),
        generic_sales_needed,
        top_product_name: top.map(|p| p.name.clone()),
        top_product_units_needed,
        status: if revenue_gap.is_zero() {
            GoalStatus::Met
        } else {
            GoalStatus::InProgress
        },
    }
}

/// `⌈gap / (revenue / count)⌉` computed as `⌈gap × count / revenue⌉`.
fn units_to_close(gap: Money, count: i64, revenue: Money) -> u64 {
    ceil_div(gap.cents() as i128 * count as i128, revenue.cents() as i128).max(0) as u64
}

/// `min(100, current / (target or 1.00) × 100)`.
pub fn progress_percent(current: Money, target: Money) -> f64 {
    let denominator = if target.is_positive() {
        target.cents()
    } else {
        MINOR_UNITS
    };
    let percent = current.cents() as f64 * 100.0 / denominator as f64;
    percent.min(100.0)
}

// =============================================================================
// Unit Tests
// =============================================================================
