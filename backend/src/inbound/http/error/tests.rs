//! Tests for boundary error classification and rendering.

use super::*;
use crate::domain::FieldErrors;
use actix_web::body::to_bytes;
use actix_web::http::header::CONTENT_TYPE;
use rstest::{fixture, rstest};

#[fixture]
fn email_failure() -> FieldErrors {
    FieldErrors::single("email", "email must be a valid address")
}

fn classified(failure: &Failure) -> ClassifiedError {
    match classify(failure) {
        Classification::Classified(classified) => classified,
        Classification::Forwarded => panic!("expected a classified failure"),
    }
}

async fn body_json(response: HttpResponse) -> Value {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

#[rstest]
fn validation_errors_classify_first(email_failure: FieldErrors) {
    let failure = Failure::from(Error::validation(email_failure));
    let result = classified(&failure);

    assert_eq!(result.kind(), ErrorKind::ValidationFailure);
    assert_eq!(result.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        result.body(),
        json!({
            "message": "Validation Failed",
            "details": { "email": { "message": "email must be a valid address" } }
        })
    );
}

#[rstest]
fn validation_without_details_renders_empty_object() {
    let failure = Failure::from(Error::new(ErrorCode::ValidationFailed, "bad"));
    assert_eq!(
        classified(&failure).body(),
        json!({ "message": "Validation Failed", "details": {} })
    );
}

#[rstest]
#[case(Error::not_found("User 7 not found"), ErrorKind::NotFound)]
#[case(Error::internal("connection reset"), ErrorKind::UnexpectedFailure)]
fn other_domain_errors_render_message_with_500(#[case] error: Error, #[case] kind: ErrorKind) {
    let message = error.message().to_owned();
    let result = classified(&Failure::from(error));

    assert_eq!(result.kind(), kind);
    assert_eq!(result.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(result.body(), json!({ "message": message }));
    assert!(result.details().is_none());
}

#[rstest]
fn unrecognised_values_are_forwarded() {
    let failure = Failure::Unrecognised("socket closed".to_owned());
    assert_eq!(classify(&failure), Classification::Forwarded);
}

#[rstest]
fn actix_errors_become_unrecognised() {
    let failure = Failure::from(actix_web::error::ErrorBadRequest("raw"));
    assert!(matches!(failure, Failure::Unrecognised(ref raw) if raw == "raw"));
}

#[rstest]
#[actix_web::test]
async fn validation_response_is_422_json(email_failure: FieldErrors) {
    let failure = Failure::from(Error::validation(email_failure));
    let response = ResponseError::error_response(&failure);

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Validation Failed");
    assert_eq!(
        body["details"]["email"]["message"],
        "email must be a valid address"
    );
}

#[rstest]
#[actix_web::test]
async fn not_found_response_is_500_with_message() {
    let failure = Failure::from(Error::not_found("User abc not found"));
    let response = ResponseError::error_response(&failure);

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "User abc not found" })
    );
}

#[rstest]
#[actix_web::test]
async fn forwarded_response_uses_framework_default() {
    let failure = Failure::Unrecognised("socket closed".to_owned());
    assert_eq!(
        ResponseError::status_code(&failure),
        StatusCode::INTERNAL_SERVER_ERROR
    );

    let response = ResponseError::error_response(&failure);
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert!(content_type.starts_with("text/plain"));

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    assert_eq!(bytes.as_ref(), b"socket closed");
}
