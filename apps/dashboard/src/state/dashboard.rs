//! # Dashboard State
//!
//! The ledger and the goal targets: the only mutable data in the app.
//!
//! ## Thread Safety
//! The dashboard is wrapped in `Arc<Mutex<T>>` so a background advisor task
//! and the console loop can both reach it. Every access is a short critical
//! section: a derive pass copies what it needs and releases the lock.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Dashboard State Operations                           │
//! │                                                                         │
//! │  User Action              Command                 State Change          │
//! │  ───────────              ───────                 ────────────          │
//! │                                                                         │
//! │  Submit sale form ───────► add_sale() ──────────► ledger.append()       │
//! │                                                                         │
//! │  Edit goal target ───────► set_target() ────────► targets.set()         │
//! │                                                                         │
//! │  Confirm reset ──────────► reset_dashboard() ───► ledger.clear()        │
//! │                                                   targets = defaults    │
//! │                                                                         │
//! │  View dashboard ─────────► get_dashboard() ─────► (read only)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use fluir_core::{GoalTargets, SaleLedger};

/// Ledger plus targets, owned by the application root.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub ledger: SaleLedger,
    pub targets: GoalTargets,
    /// What a reset restores.
    pub default_targets: GoalTargets,
}

impl Dashboard {
    pub fn new(default_targets: GoalTargets) -> Self {
        Dashboard {
            ledger: SaleLedger::new(),
            targets: default_targets,
            default_targets,
        }
    }

    /// Clears every sale and restores the default targets.
    pub fn reset(&mut self) {
        self.ledger.clear();
        self.targets = self.default_targets;
    }

    /// True when a reset would change anything.
    pub fn has_data_to_reset(&self) -> bool {
        !self.ledger.is_empty() || !self.targets.matches(&self.default_targets)
    }
}

/// Shared handle to the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardState {
    inner: Arc<Mutex<Dashboard>>,
}

impl DashboardState {
    pub fn new(default_targets: GoalTargets) -> Self {
        DashboardState {
            inner: Arc::new(Mutex::new(Dashboard::new(default_targets))),
        }
    }

    // append validates before pushing, so a poisoned lock never holds a partial write
    fn lock(&self) -> MutexGuard<'_, Dashboard> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Executes a function with read access to the dashboard.
    ///
    /// ## Usage
    /// ```rust
    /// use fluir_core::GoalTargets;
    /// use fluir_dashboard::state::DashboardState;
    ///
    /// let state = DashboardState::new(GoalTargets::default());
    /// let count = state.with_dashboard(|d| d.ledger.len());
    /// assert_eq!(count, 0);
    /// ```
    pub fn with_dashboard<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Dashboard) -> R,
    {
        let dashboard = self.lock();
        f(&dashboard)
    }

    /// Executes a function with write access to the dashboard.
    pub fn with_dashboard_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Dashboard) -> R,
    {
        let mut dashboard = self.lock();
        f(&mut dashboard)
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(GoalTargets::default())
    }
}
