//! # State Module
//!
//! Manages application state for the dashboard.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐   │
//! │  │  DashboardState  │ │   AdvisorState   │ │   DashboardConfig    │   │
//! │  │                  │ │                  │ │                      │   │
//! │  │  Arc<Mutex<      │ │  InsightService  │ │  business_name       │   │
//! │  │    ledger,       │ │  pending task    │ │  currency_symbol     │   │
//! │  │    targets >>    │ │  (cancellable)   │ │  utc offset          │   │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • DashboardState: Arc<Mutex<T>>, never held across an await           │
//! │  • AdvisorState: pending task swapped under a short lock               │
//! │  • DashboardConfig: read-only after startup                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command takes only the state it needs.

mod advisor;
mod config;
mod dashboard;

pub use advisor::AdvisorState;
pub use config::{ConfigError, DashboardConfig};
pub use dashboard::{Dashboard, DashboardState};
