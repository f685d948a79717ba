//! # fluir-advisor: Business Insights for the Fluir Dashboard
//!
//! Turns a [`fluir_core::Metrics`] snapshot and the current goal targets into
//! a short strategy note written by a language-generation model.
//!
//! ## Modules
//!
//! - [`config`] - `advisor.toml` + environment loading
//! - [`prompt`] - Prompt text built from derived metrics
//! - [`client`] - `Advisor` trait and the Gemini HTTP backend
//! - [`service`] - Timeout, background task, fallback texts
//! - [`error`] - Advisor error types
//!
//! ## Usage
//! ```rust,no_run
//! use std::sync::Arc;
//! use fluir_advisor::{AdvisorConfig, GeminiAdvisor, InsightService, PromptContext};
//! use fluir_core::{GoalTargets, Metrics};
//!
//! # async fn run() -> fluir_advisor::AdvisorResult<()> {
//! let config = AdvisorConfig::load(None)?;
//! let advisor = GeminiAdvisor::from_config(&config)?;
//! let service = InsightService::new(Arc::new(advisor), PromptContext::default(), config.timeout());
//!
//! let insight = service
//!     .get_business_insights(&Metrics::default(), &GoalTargets::default())
//!     .await;
//! println!("{}", insight.text());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod prompt;
pub mod service;

pub use client::{Advisor, GeminiAdvisor};
pub use config::AdvisorConfig;
pub use error::{AdvisorError, AdvisorResult};
pub use prompt::{build_prompt, PromptContext};
pub use service::{Insight, InsightService, InsightTask};
