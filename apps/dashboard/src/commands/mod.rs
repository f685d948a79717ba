//! # Dashboard Commands
//!
//! Every operation a front end can invoke. Commands are plain functions over
//! the state handles they need, returning serializable DTOs or [`ApiError`].
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── sale.rs     ◄─── Record and list sales
//! ├── metrics.rs  ◄─── Metrics snapshot and full dashboard view
//! ├── goal.rs     ◄─── Goal simulation, targets, reset
//! └── advisor.rs  ◄─── Business insights (async, cancellable)
//! ```
//!
//! ## Evaluation Instant
//! Commands that derive metrics take `now` explicitly. The console passes
//! [`crate::state::DashboardConfig::now`]; tests pass a fixed instant.
//!
//! [`ApiError`]: crate::error::ApiError

pub mod advisor;
pub mod goal;
pub mod metrics;
pub mod sale;
