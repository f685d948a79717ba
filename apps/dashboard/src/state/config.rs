//! # Dashboard Configuration
//!
//! Business details, display settings and the default goal targets.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`FLUIR_*`)
//! 2. Config file (`dashboard.toml` in the platform config dir)
//! 3. Defaults (this file)
//!
//! ## Configuration File Format
//! ```toml
//! # dashboard.toml
//! business_name = "Agência Fluir"
//! currency_symbol = "R$"
//! utc_offset_minutes = -180
//! monthly_target = "10000.00"
//! annual_target = "120000.00"
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after startup, so no mutex is needed.

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use fluir_advisor::PromptContext;
use fluir_core::{GoalTargets, Money};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Largest UTC offset a real timezone uses (±14:00).
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Failure to load or validate dashboard configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    LoadFailed(String),

    #[error("Invalid dashboard configuration: {0}")]
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Business name (header and advisor prompt)
    pub business_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Offset from UTC used for calendar month/year windows and daily buckets.
    pub utc_offset_minutes: i32,

    /// Default monthly target, as decimal text.
    pub monthly_target: String,

    /// Default annual target, as decimal text.
    pub annual_target: String,
}

impl Default for DashboardConfig {
    /// ## Default Values
    /// - Business: "Agência Fluir"
    /// - Currency: R$
    /// - Timezone: UTC-03:00
    /// - Targets: 10 000.00 monthly, 120 000.00 annual
    fn default() -> Self {
        let targets = GoalTargets::default();
        DashboardConfig {
            business_name: "Agência Fluir".to_string(),
            currency_symbol: "R$".to_string(),
            utc_offset_minutes: -180,
            monthly_target: targets.monthly.to_string(),
            annual_target: targets.annual.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Loads configuration from file, environment, and defaults.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading dashboard config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Dashboard config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load dashboard config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Applies overrides from a variable lookup.
    ///
    /// ## Variables
    /// - `FLUIR_BUSINESS_NAME`
    /// - `FLUIR_CURRENCY_SYMBOL`
    /// - `FLUIR_UTC_OFFSET_MINUTES`
    /// - `FLUIR_TARGET_MONTHLY`, `FLUIR_TARGET_ANNUAL` (decimal text)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("FLUIR_BUSINESS_NAME") {
            self.business_name = name;
        }

        if let Some(symbol) = lookup("FLUIR_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(offset) = lookup("FLUIR_UTC_OFFSET_MINUTES") {
            match offset.trim().parse::<i32>() {
                Ok(minutes) => self.utc_offset_minutes = minutes,
                Err(_) => warn!(value = %offset, "Invalid FLUIR_UTC_OFFSET_MINUTES in environment"),
            }
        }

        if let Some(target) = lookup("FLUIR_TARGET_MONTHLY") {
            debug!(target = %target, "Overriding monthly target from environment");
            self.monthly_target = target;
        }

        if let Some(target) = lookup("FLUIR_TARGET_ANNUAL") {
            debug!(target = %target, "Overriding annual target from environment");
            self.annual_target = target;
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(ConfigError::Invalid(format!(
                "utc_offset_minutes must be within ±{}, got {}",
                MAX_UTC_OFFSET_MINUTES, self.utc_offset_minutes
            )));
        }

        self.default_targets()?;
        Ok(())
    }

    /// The targets a reset restores.
    pub fn default_targets(&self) -> Result<GoalTargets, ConfigError> {
        let parse = |field: &str, text: &str| {
            text.parse::<Money>()
                .map_err(|e| ConfigError::Invalid(format!("{}: {}", field, e)))
        };
        let monthly = parse("monthly_target", &self.monthly_target)?;
        let annual = parse("annual_target", &self.annual_target)?;

        GoalTargets::new(monthly, annual).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Timezone used for calendar windows.
    pub fn timezone(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .unwrap_or_else(|| Utc.fix())
    }

    /// Current instant in the configured timezone.
    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.timezone())
    }

    /// Formats money with the configured symbol.
    ///
    /// ## Example
    /// ```rust
    /// use fluir_core::Money;
    /// use fluir_dashboard::state::DashboardConfig;
    ///
    /// let config = DashboardConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(123456)), "R$ 1234.56");
    /// assert_eq!(config.format_currency(Money::from_cents(-550)), "-R$ 5.50");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        format!(
            "{}{} {}.{:02}",
            sign,
            self.currency_symbol,
            amount.major().abs(),
            amount.minor_part()
        )
    }

    /// Business details for the advisor prompt.
    pub fn prompt_context(&self) -> PromptContext {
        PromptContext {
            business_name: self.business_name.clone(),
            currency_symbol: self.currency_symbol.clone(),
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "fluir", "dashboard")
            .map(|dirs| dirs.config_dir().join("dashboard.toml"))
    }
}
