use accounts_common::ErrorBody;
use axum::{http::StatusCode, response::IntoResponse};
use backend_lib::{error::AppError, models::UniqueField, validation::ValidationError};

async fn envelope(err: AppError) -> (StatusCode, ErrorBody) {
    let response = err.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_conflict_envelope_names_the_field() {
    let (status, body) = envelope(AppError::Conflict(UniqueField::Username)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body.status, 409);
    assert_eq!(body.code, "BAD_REQUEST");
    assert!(body.message.contains("username"));
}

#[tokio::test]
async fn test_validation_envelope() {
    let (status, body) = envelope(ValidationError::Missing("email").into()).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body.status, 422);
    assert_eq!(body.code, "BAD_REQUEST");
    assert!(body.message.contains("email"));
}

#[tokio::test]
async fn test_status_field_matches_http_status() {
    let errors = vec![
        AppError::InvalidCredentials,
        AppError::Unauthenticated,
        AppError::NotFound("user 1".to_string()),
        AppError::Internal("boom".to_string()),
    ];

    for err in errors {
        let expected = err.status_code();
        let (status, body) = envelope(err).await;
        assert_eq!(status, expected);
        assert_eq!(body.status, expected.as_u16());
    }
}

#[test]
fn test_internal_details_are_sanitized() {
    let err = AppError::Internal("disk /var/data is full".to_string());
    assert!(!err.sanitized_message().contains("/var/data"));
    assert_eq!(err.error_code(), "INTERNAL_ERROR");
}

#[test]
fn test_io_errors_convert() {
    let io = std::io::Error::new(std::io::ErrorKind::Other, "gone");
    let err: AppError = io.into();
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}
