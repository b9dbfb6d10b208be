//! Boundary error classification for HTTP responses.
//!
//! Every failure that escapes a handler is a [`Failure`]. [`classify`] sorts
//! it into one of three kinds, each with a fixed status and body shape:
//!
//! | kind               | status | body                                        |
//! |--------------------|--------|---------------------------------------------|
//! | validation failure | 422    | `{"message":"Validation Failed","details"}` |
//! | not found          | 500    | `{"message"}`                               |
//! | unexpected failure | 500    | `{"message"}`                               |
//!
//! Missing records keep the 500 status existing clients already depend on.
//! Values that are not domain errors are forwarded unchanged to the
//! framework's default error surface, a plain-text 500.

use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::{Value, json};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, VALIDATION_FAILED_MESSAGE};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Failure>;

/// Anything a handler can fail with.
#[derive(Debug)]
pub enum Failure {
    /// A domain error raised by the service or request parsing.
    Error(Error),
    /// A value that is not a domain error, kept only as text.
    Unrecognised(String),
}

impl From<Error> for Failure {
    fn from(value: Error) -> Self {
        Self::Error(value)
    }
}

impl From<actix_web::Error> for Failure {
    fn from(value: actix_web::Error) -> Self {
        Self::Unrecognised(value.to_string())
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(error) => write!(f, "{error}"),
            Self::Unrecognised(raw) => f.write_str(raw),
        }
    }
}

/// Category of a recognised failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ValidationFailure,
    NotFound,
    UnexpectedFailure,
}

/// Recognised failure with everything needed to render it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedError {
    kind: ErrorKind,
    message: String,
    details: Option<Value>,
}

impl ClassifiedError {
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Per-field report. Present only for validation failures.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    pub fn status(&self) -> StatusCode {
        match self.kind {
            ErrorKind::ValidationFailure => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::NotFound | ErrorKind::UnexpectedFailure => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// JSON response body.
    pub fn body(&self) -> Value {
        match self.kind {
            ErrorKind::ValidationFailure => json!({
                "message": self.message,
                "details": self.details.clone().unwrap_or_else(|| json!({})),
            }),
            ErrorKind::NotFound | ErrorKind::UnexpectedFailure => json!({
                "message": self.message,
            }),
        }
    }
}

/// Outcome of [`classify`].
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Classified(ClassifiedError),
    /// Not a domain error; rendered by the framework default.
    Forwarded,
}

/// Sort a failure into its response category.
///
/// Validation failures are checked first, then any other domain error. Every
/// other value is forwarded.
///
/// # Examples
/// ```
/// use user_service::domain::Error;
/// use user_service::inbound::http::error::{Classification, ErrorKind, Failure, classify};
///
/// let Classification::Classified(found) = classify(&Failure::from(Error::not_found("User 1 not found"))) else {
///     panic!("domain errors are classified");
/// };
/// assert_eq!(found.kind(), ErrorKind::NotFound);
/// assert_eq!(found.status().as_u16(), 500);
///
/// assert_eq!(classify(&Failure::Unrecognised("boom".into())), Classification::Forwarded);
/// ```
pub fn classify(failure: &Failure) -> Classification {
    let Failure::Error(error) = failure else {
        return Classification::Forwarded;
    };
    let classified = match error.code() {
        ErrorCode::ValidationFailed => ClassifiedError {
            kind: ErrorKind::ValidationFailure,
            message: VALIDATION_FAILED_MESSAGE.to_owned(),
            details: Some(error.details().cloned().unwrap_or_else(|| json!({}))),
        },
        ErrorCode::NotFound => ClassifiedError {
            kind: ErrorKind::NotFound,
            message: error.message().to_owned(),
            details: None,
        },
        ErrorCode::InternalError => ClassifiedError {
            kind: ErrorKind::UnexpectedFailure,
            message: error.message().to_owned(),
            details: None,
        },
    };
    Classification::Classified(classified)
}

fn default_surface(raw: &str) -> HttpResponse {
    actix_web::error::ErrorInternalServerError(raw.to_owned()).error_response()
}

impl ResponseError for Failure {
    fn status_code(&self) -> StatusCode {
        match classify(self) {
            Classification::Classified(classified) => classified.status(),
            Classification::Forwarded => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let Classification::Classified(classified) = classify(self) else {
            error!(error = %self, "unrecognised failure forwarded to default handler");
            return default_surface(&self.to_string());
        };
        match classified.kind() {
            ErrorKind::ValidationFailure => {
                warn!(details = ?classified.details(), "request failed validation");
            }
            ErrorKind::NotFound | ErrorKind::UnexpectedFailure => {
                error!(message = classified.message(), kind = ?classified.kind(), "request failed");
            }
        }
        HttpResponse::build(classified.status()).json(classified.body())
    }
}

#[cfg(test)]
mod tests;
