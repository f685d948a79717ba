//! # Advisor Configuration
//!
//! Connection settings for the language-generation API.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     FLUIR_API_KEY (or API_KEY)                                         │
//! │     FLUIR_ADVISOR_MODEL, FLUIR_ADVISOR_URL                             │
//! │     FLUIR_ADVISOR_TIMEOUT_SECS                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/fluir-dashboard/advisor.toml (Linux)                     │
//! │     ~/Library/Application Support/com.fluir.dashboard/advisor.toml    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     gemini-2.5-flash, 30 second timeout, no key                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # advisor.toml
//! [api]
//! base_url = "https://generativelanguage.googleapis.com"
//! model = "gemini-2.5-flash"
//! timeout_secs = 30
//! ```
//!
//! The key may also live under `[api] api_key`, but it is never written back
//! out and never logged.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{AdvisorError, AdvisorResult};

/// Default generation API host.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default generation model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

// =============================================================================
// API Settings
// =============================================================================

/// Settings for the generation API.
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Secret key. Skipped on serialization.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Upper bound for one insights call, end to end.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

// =============================================================================
// Main Advisor Configuration
// =============================================================================

/// Complete advisor configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvisorConfig {
    #[serde(default)]
    pub api: ApiSettings,
}

impl AdvisorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (advisor.toml)
    /// 3. Environment variables
    ///
    /// A missing API key is not a load error; the service reports it when a
    /// call is attempted.
    pub fn load(config_path: Option<PathBuf>) -> AdvisorResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading advisor config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Advisor config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load advisor config: {}. Using defaults.", e);
            let mut config = Self::default();
            config.apply_overrides(|key| std::env::var(key).ok());
            config
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AdvisorResult<()> {
        let url = &self.api.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(AdvisorError::InvalidUrl(format!(
                "Advisor URL must start with http:// or https://, got: {}",
                url
            )));
        }

        if self.api.model.trim().is_empty() {
            return Err(AdvisorError::InvalidConfig("model must not be empty".into()));
        }

        if self.api.timeout_secs == 0 {
            return Err(AdvisorError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies overrides from a variable lookup (the process environment in
    /// production).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = lookup("FLUIR_API_KEY")
            .or_else(|| lookup("API_KEY"))
            .filter(|k| !k.trim().is_empty());
        if let Some(key) = key {
            debug!("Using advisor API key from environment");
            self.api.api_key = Some(key);
        }

        if let Some(model) = lookup("FLUIR_ADVISOR_MODEL") {
            debug!(model = %model, "Overriding advisor model from environment");
            self.api.model = model;
        }

        if let Some(url) = lookup("FLUIR_ADVISOR_URL") {
            debug!(url = %url, "Overriding advisor URL from environment");
            self.api.base_url = url;
        }

        if let Some(secs) = lookup("FLUIR_ADVISOR_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(s) => self.api.timeout_secs = s,
                Err(_) => warn!(value = %secs, "Invalid FLUIR_ADVISOR_TIMEOUT_SECS in environment"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "fluir", "dashboard")
            .map(|dirs| dirs.config_dir().join("advisor.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns the API key, if one is configured.
    pub fn api_key(&self) -> Option<&str> {
        self.api.api_key.as_deref()
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}
