//! # fluir-core: Sales Metrics & Goal Simulation Engine
//!
//! This crate is the **heart** of the Fluir dashboard. It turns a raw list of
//! sales into revenue metrics, a Pareto product classification and the
//! "how many more sales do I need" arithmetic, as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Fluir Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Dashboard (apps/dashboard)                   │   │
//! │  │    Sale form ──► KPI cards ──► Charts ──► Goal panel ──► Advisor│   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ fluir-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  ledger   │─►│  metrics  │─►│   goal    │  │ timeline  │  │   │
//! │  │   │   Sale    │  │  Metrics  │  │ GoalState │  │  Daily    │  │   │
//! │  │   │  append   │  │  Pareto   │  │  targets  │  │  Revenue  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • `now` IS ALWAYS INJECTED               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    fluir-advisor (async)                        │   │
//! │  │          Formats a Metrics snapshot into a prompt, returns prose│   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Sale, ProductSummary, GoalPeriod)
//! - [`money`] - Money type with integer arithmetic
//! - [`ledger`] - Append-only sale record
//! - [`metrics`] - Snapshot derivation and ABC classification
//! - [`goal`] - Targets and gap projections
//! - [`timeline`] - Revenue per calendar day
//! - [`error`] - Domain error types
//! - [`validation`] - Input rules enforced at the ledger boundary
//!
//! ## Example Usage
//!
//! ```rust
//! use fluir_core::{derive_metrics, simulate_goal, GoalPeriod, GoalTargets, Money, SaleLedger};
//!
//! let mut ledger = SaleLedger::new();
//! let sale = ledger.append("Consultoria", "2500".parse().unwrap(), 2).unwrap();
//!
//! let metrics = derive_metrics(ledger.all(), &sale.timestamp());
//! let targets = GoalTargets::default();
//! let goal = simulate_goal(&metrics, GoalPeriod::Monthly, targets.monthly);
//!
//! assert_eq!(goal.revenue_gap, Money::from_major(5_000));
//! assert_eq!(goal.progress_percent, 50.0);
//! assert_eq!(goal.top_product_units_needed, 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod goal;
pub mod ledger;
pub mod metrics;
pub mod money;
pub mod timeline;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use goal::{simulate_goal, GoalState, GoalStatus, GoalTargets};
pub use ledger::SaleLedger;
pub use metrics::{derive_metrics, CategoryRevenue, Metrics};
pub use money::Money;
pub use timeline::{daily_revenue, DailyRevenue};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of products shown in the "top products" chart.
pub const TOP_PRODUCTS_CHART_LEN: usize = 5;
