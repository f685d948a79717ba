//! # Advisor Error Types
//!
//! Error types for the business insights call.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Advisor Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Response            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  MissingApiKey  │  │  RequestFailed  │  │  Api { status, msg }    │ │
//! │  │  InvalidConfig  │  │  Timeout        │  │  DecodeFailed           │ │
//! │  │  InvalidUrl     │  │  Cancelled      │  │  EmptyResponse          │ │
//! │  │  ConfigLoad...  │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  None of these reach the metrics engine. The service turns every one   │
//! │  of them into user-visible fallback text.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for advisor operations.
pub type AdvisorResult<T> = Result<T, AdvisorError>;

/// Everything that can go wrong while asking for insights.
#[derive(Debug, Error)]
pub enum AdvisorError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// No API key in the config file or environment.
    #[error("Advisor API key not configured. Set FLUIR_API_KEY or API_KEY.")]
    MissingApiKey,

    /// Invalid advisor configuration.
    #[error("Invalid advisor configuration: {0}")]
    InvalidConfig(String),

    /// Invalid API base URL.
    #[error("Invalid advisor URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The HTTP request could not be completed.
    #[error("Advisor request failed: {0}")]
    RequestFailed(String),

    /// The call did not finish in time.
    #[error("Advisor timeout after {0} seconds")]
    Timeout(u64),

    /// The caller cancelled the pending call.
    #[error("Advisor request cancelled")]
    Cancelled,

    // =========================================================================
    // Response Errors
    // =========================================================================
    /// The API answered with a non-success status.
    #[error("Advisor API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body was not the expected shape.
    #[error("Failed to decode advisor response: {0}")]
    DecodeFailed(String),

    /// The model returned no text.
    #[error("Advisor returned an empty response")]
    EmptyResponse,
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for AdvisorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AdvisorError::DecodeFailed(err.to_string())
        } else if err.is_builder() {
            AdvisorError::InvalidUrl(err.to_string())
        } else {
            AdvisorError::RequestFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AdvisorError {
    fn from(err: serde_json::Error) -> Self {
        AdvisorError::DecodeFailed(err.to_string())
    }
}

impl From<std::io::Error> for AdvisorError {
    fn from(err: std::io::Error) -> Self {
        AdvisorError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for AdvisorError {
    fn from(err: toml::de::Error) -> Self {
        AdvisorError::ConfigLoadFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl AdvisorError {
    /// Returns true if asking again later might succeed.
    ///
    /// Rate limiting (429) and server errors (5xx) are retryable; any other
    /// API status is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            AdvisorError::RequestFailed(_) | AdvisorError::Timeout(_) => true,
            AdvisorError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Returns true if this error indicates a configuration problem.
    ///
    /// A 401 or 403 from the API is a bad key, so it counts too.
    pub fn is_config_error(&self) -> bool {
        match self {
            AdvisorError::MissingApiKey
            | AdvisorError::InvalidConfig(_)
            | AdvisorError::InvalidUrl(_)
            | AdvisorError::ConfigLoadFailed(_) => true,
            AdvisorError::Api { status, .. } => matches!(*status, 400 | 401 | 403),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(AdvisorError::RequestFailed("connection reset".into()).is_retryable());
        assert!(AdvisorError::Timeout(30).is_retryable());
        assert!(AdvisorError::Api {
            status: 503,
            message: "overloaded".into()
        }
        .is_retryable());
        assert!(AdvisorError::Api {
            status: 429,
            message: "quota".into()
        }
        .is_retryable());

        assert!(!AdvisorError::MissingApiKey.is_retryable());
        assert!(!AdvisorError::EmptyResponse.is_retryable());
        assert!(!AdvisorError::Cancelled.is_retryable());
    }

    #[test]
    fn test_config_errors() {
        assert!(AdvisorError::MissingApiKey.is_config_error());
        assert!(AdvisorError::Api {
            status: 403,
            message: "API key not valid".into()
        }
        .is_config_error());
        assert!(!AdvisorError::Timeout(5).is_config_error());
    }

    #[test]
    fn test_error_display() {
        let err = AdvisorError::Api {
            status: 400,
            message: "bad request".into(),
        };
        assert!(err.to_string().contains("400"));
        assert!(err.to_string().contains("bad request"));
    }
}
