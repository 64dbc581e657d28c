// Error handling tests

use anh2prompt::error::{
    GatewayError, MSG_GENERATION_FAILED, MSG_INVALID_API_KEY, MSG_INVALID_FILE_TYPE,
    MSG_MISSING_API_KEY, MSG_MISSING_IMAGE, MSG_QUOTA_EXCEEDED, MSG_SAFETY_BLOCKED,
};
use axum::http::StatusCode;

#[test]
fn test_error_display_messages() {
    let errors = vec![
        GatewayError::MissingApiKey,
        GatewayError::MissingImage,
        GatewayError::InvalidFileType("text/plain".to_string()),
        GatewayError::InvalidApiKey("bad key".to_string()),
        GatewayError::QuotaExceeded("quota".to_string()),
        GatewayError::SafetyBlocked("SAFETY".to_string()),
        GatewayError::Upstream("boom".to_string()),
    ];

    for error in errors {
        let display = format!("{}", error);
        assert!(!display.is_empty(), "Error should have display message");
    }
}

#[test]
fn test_status_and_message_mapping() {
    let cases: Vec<(GatewayError, StatusCode, &str)> = vec![
        (
            GatewayError::MissingApiKey,
            StatusCode::INTERNAL_SERVER_ERROR,
            MSG_MISSING_API_KEY,
        ),
        (
            GatewayError::MissingImage,
            StatusCode::BAD_REQUEST,
            MSG_MISSING_IMAGE,
        ),
        (
            GatewayError::InvalidFileType("text/plain".to_string()),
            StatusCode::BAD_REQUEST,
            MSG_INVALID_FILE_TYPE,
        ),
        (
            GatewayError::InvalidApiKey("rejected".to_string()),
            StatusCode::UNAUTHORIZED,
            MSG_INVALID_API_KEY,
        ),
        (
            GatewayError::QuotaExceeded("exhausted".to_string()),
            StatusCode::TOO_MANY_REQUESTS,
            MSG_QUOTA_EXCEEDED,
        ),
        (
            GatewayError::SafetyBlocked("SAFETY".to_string()),
            StatusCode::BAD_REQUEST,
            MSG_SAFETY_BLOCKED,
        ),
        (
            GatewayError::Upstream("anything else".to_string()),
            StatusCode::INTERNAL_SERVER_ERROR,
            MSG_GENERATION_FAILED,
        ),
    ];

    for (error, expected_status, expected_message) in cases {
        let (status, message) = error.status_and_message();
        assert_eq!(status, expected_status);
        assert_eq!(message, expected_message);
    }
}

#[test]
fn test_upstream_classification_by_substring() {
    let err = GatewayError::from_upstream(None, "API key not valid");
    assert!(matches!(err, GatewayError::InvalidApiKey(_)));

    let err = GatewayError::from_upstream(None, "quota exceeded for project");
    assert!(matches!(err, GatewayError::QuotaExceeded(_)));

    let err = GatewayError::from_upstream(None, "you hit a rate limit");
    assert!(matches!(err, GatewayError::QuotaExceeded(_)));

    let err = GatewayError::from_upstream(None, "blocked: SAFETY");
    assert!(matches!(err, GatewayError::SafetyBlocked(_)));

    let err = GatewayError::from_upstream(None, "socket hang up");
    assert!(matches!(err, GatewayError::Upstream(_)));
}

#[test]
fn test_upstream_classification_by_status() {
    let err = GatewayError::from_upstream(Some(401), "no detail");
    assert!(matches!(err, GatewayError::InvalidApiKey(_)));

    let err = GatewayError::from_upstream(Some(403), "no detail");
    assert!(matches!(err, GatewayError::InvalidApiKey(_)));

    let err = GatewayError::from_upstream(Some(429), "no detail");
    assert!(matches!(err, GatewayError::QuotaExceeded(_)));

    let err = GatewayError::from_upstream(Some(500), "no detail");
    assert!(matches!(err, GatewayError::Upstream(_)));
}
