//! Tests for domain error construction.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(Error::not_found("User 1 not found"), ErrorCode::NotFound)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
#[case(Error::validation(FieldErrors::single("name", "required")), ErrorCode::ValidationFailed)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InternalError, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
#[case(ErrorCode::InternalError, "Internal server error")]
#[case(ErrorCode::NotFound, "Not found")]
#[case(ErrorCode::ValidationFailed, "Validation Failed")]
fn new_substitutes_blank_messages(#[case] code: ErrorCode, #[case] expected: &str) {
    let error = Error::new(code, "");
    assert_eq!(error.message(), expected);
}

#[rstest]
fn validation_carries_field_report() {
    let error = Error::validation(FieldErrors::single("email", "email is required"));

    assert_eq!(error.message(), VALIDATION_FAILED_MESSAGE);
    assert_eq!(
        error.details(),
        Some(&json!({ "email": { "message": "email is required" } }))
    );
}

#[rstest]
fn display_is_the_message() {
    assert_eq!(Error::internal("connection reset").to_string(), "connection reset");
}

#[rstest]
fn error_code_serialises_in_snake_case() {
    let value = serde_json::to_value(ErrorCode::ValidationFailed).expect("code serialises");
    assert_eq!(value, json!("validation_failed"));
}
