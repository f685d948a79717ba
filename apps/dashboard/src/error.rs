//! # API Error Type
//!
//! Unified error type for dashboard commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Dashboard                          │
//! │                                                                         │
//! │  Console / Frontend            Rust Backend                             │
//! │  ──────────────────            ────────────                             │
//! │                                                                         │
//! │  add "Camiseta" 0 2                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Validation Error? ─── ValidationError::MustBePositive ──┐      │  │
//! │  │         │                                                │      │  │
//! │  │         ▼                                                ▼      │  │
//! │  │  Advisor Error? ─── AdvisorError::MissingApiKey ──── ApiError ──►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "VALIDATION_ERROR", "message": "unit_price must be positive" }│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors are `Serialize` so a frontend can switch on the machine-readable
//! `code` and show the human-readable `message`.

use fluir_advisor::AdvisorError;
use fluir_core::{CoreError, ValidationError};
use serde::Serialize;

/// API error returned from dashboard commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "quantity must be positive"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// Business rule rejected the request (e.g. negative target)
    BusinessLogic,

    /// Advisor is not configured (missing key, bad URL)
    AdvisorConfig,

    /// Advisor call failed or was cancelled
    AdvisorUnavailable,

    /// Nothing to act on (e.g. no pending advisor request)
    NotFound,

    /// Unrecognised console input
    UnknownCommand,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::NotFound, message)
    }

    /// Creates an unknown command error.
    pub fn unknown_command(input: &str) -> Self {
        ApiError::new(
            ErrorCode::UnknownCommand,
            format!("Unknown command: '{}'. Type 'help' for a list of commands.", input),
        )
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NegativeTarget(_) => ApiError::new(ErrorCode::BusinessLogic, err.to_string()),
            CoreError::UnknownPeriod(_) => ApiError::validation(err.to_string()),
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

/// Converts advisor errors to API errors.
///
/// Transport details are logged, not shown.
impl From<AdvisorError> for ApiError {
    fn from(err: AdvisorError) -> Self {
        if err.is_config_error() {
            return ApiError::new(ErrorCode::AdvisorConfig, err.to_string());
        }
        match err {
            AdvisorError::Cancelled => {
                ApiError::new(ErrorCode::AdvisorUnavailable, "Advisor request cancelled")
            }
            other => {
                tracing::error!("Advisor call failed: {}", other);
                ApiError::new(ErrorCode::AdvisorUnavailable, "Advisor is unavailable right now")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
