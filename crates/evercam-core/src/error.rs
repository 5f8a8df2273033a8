//! Error types for Evercam operations.
//!
//! Every failure surfaced by this library is an [`ApiError`]: server-reported
//! business errors, unparseable or unexpected responses, transport failures
//! and configuration mistakes alike. Callers tell them apart through
//! [`ApiError::code`] and [`ApiError::status`].

use serde_json::Value;
use thiserror::Error;

/// Code reported when no code was supplied.
pub const UNKNOWN_ERROR: &str = "unknown_error";
/// Code for responses that could not be interpreted.
pub const INVALID_RESPONSE: &str = "invalid_response";
/// Code for verb names outside the supported set.
pub const UNSUPPORTED_VERB: &str = "unsupported_verb";
/// Code for rejected client configuration.
pub const CONFIG_ERROR: &str = "config_error";
/// Code for transport-level HTTP failures.
pub const HTTP_ERROR: &str = "http_error";
/// Code for transport-level timeouts.
pub const TIMEOUT: &str = "timeout";

/// Message used when a response lacks the data an operation expects.
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response received from server.";
/// Message used when an error payload carries no message of its own.
pub const GENERIC_ERROR_MESSAGE: &str = "API call returned an error.";

/// Unified error type for Evercam operations.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    message: String,
    code: Option<String>,
    status: Option<u16>,
    context: Vec<Value>,
}

/// Specialized result type for Evercam operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an error carrying only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            status: None,
            context: Vec::new(),
        }
    }

    /// Attach an error code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attach an optional error code, leaving the stored code unset for `None`.
    #[must_use]
    pub fn with_optional_code(mut self, code: Option<String>) -> Self {
        self.code = code;
        self
    }

    /// Attach the HTTP status the error is associated with.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attach contextual values.
    #[must_use]
    pub fn with_context(mut self, context: Vec<Value>) -> Self {
        self.context = context;
        self
    }

    /// The sentinel raised when a response is missing the data an operation
    /// expects.
    #[must_use]
    pub fn invalid_response() -> Self {
        Self::new(INVALID_RESPONSE_MESSAGE).with_code(INVALID_RESPONSE)
    }

    /// A configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(message).with_code(CONFIG_ERROR)
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Error code, `"unknown_error"` when none was supplied.
    #[must_use]
    pub fn code(&self) -> &str {
        self.code.as_deref().unwrap_or(UNKNOWN_ERROR)
    }

    /// The code exactly as stored.
    #[must_use]
    pub fn raw_code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// HTTP status, if the error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// Auxiliary values attached by the server, in order.
    #[must_use]
    pub fn context(&self) -> &[Value] {
        &self.context
    }

    /// Returns true for errors raised because a response could not be used.
    #[must_use]
    pub fn is_invalid_response(&self) -> bool {
        self.code() == INVALID_RESPONSE
    }
}

// Conversions from external error types
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        let code = if err.is_timeout() { TIMEOUT } else { HTTP_ERROR };
        let error = Self::new(err.to_string()).with_code(code);
        match err.status() {
            Some(status) => error.with_status(status.as_u16()),
            None => error,
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        Self::config(format!("Invalid endpoint URL: {err}"))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Failed to parse response: {err}")).with_code(INVALID_RESPONSE)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::config(format!("Invalid configuration: {err}"))
    }
}
