//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters decide how each
//! [`ErrorCode`] is rendered on the wire.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::FieldErrors;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Input failed schema or field validation.
    ValidationFailed,
    /// The requested record does not exist.
    NotFound,
    /// Anything else raised while serving the request.
    InternalError,
}

impl ErrorCode {
    fn fallback_message(self) -> &'static str {
        match self {
            Self::ValidationFailed => VALIDATION_FAILED_MESSAGE,
            Self::NotFound => "Not found",
            Self::InternalError => "Internal server error",
        }
    }
}

/// Message carried by every validation failure.
pub const VALIDATION_FAILED_MESSAGE: &str = "Validation Failed";

/// Domain error payload.
///
/// ## Invariants
/// - `message` is non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use user_service::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("User 42 not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "User 42 not found");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    details: Option<Value>,
}

/// Validation errors emitted by [`Error::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    #[error("error message must not be empty")]
    EmptyMessage,
}

impl Error {
    /// Create a new error.
    ///
    /// A blank message is replaced with a generic one for the code so the
    /// message invariant always holds.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::try_new(code, message).unwrap_or_else(|_| Self {
            code,
            message: code.fallback_message().to_owned(),
            details: None,
        })
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            details: None,
        })
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary structured details, such as per-field failures.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Validation failure carrying the per-field report as details.
    ///
    /// # Examples
    /// ```
    /// use user_service::domain::{Error, ErrorCode, FieldErrors};
    ///
    /// let err = Error::validation(FieldErrors::single("name", "name is required"));
    /// assert_eq!(err.code(), ErrorCode::ValidationFailed);
    /// assert_eq!(err.message(), "Validation Failed");
    /// assert!(err.details().is_some());
    /// ```
    pub fn validation(fields: FieldErrors) -> Self {
        Self::new(ErrorCode::ValidationFailed, VALIDATION_FAILED_MESSAGE)
            .with_details(fields.to_value())
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests;
