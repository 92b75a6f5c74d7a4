//! 错误处理单元测试
//!
//! 测试应用错误类型的状态码、消息与响应格式

use axum::{http::StatusCode, response::IntoResponse};
use http_body_util::BodyExt;
use todo_service::error::{AppError, AuthError, ErrorDetail, ErrorResponse, StorageError};

// ==================== 错误状态码测试 ====================

#[test]
fn test_error_status_codes() {
    assert_eq!(AppError::Validation("x".to_string()).status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(AppError::Auth(AuthError::Expired).status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(AppError::ForbiddenOrNotFound.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(AppError::UsernameTaken.status_code(), StatusCode::CONFLICT);
    assert_eq!(
        AppError::Storage(StorageError::Timeout).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        AppError::Config("bad".to_string()).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        AppError::Internal("boom".to_string()).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

// ==================== 用户消息测试 ====================

#[test]
fn test_user_messages_no_sensitive_info() {
    let db_error = AppError::from(sqlx::Error::RowNotFound);
    let message = db_error.user_message();
    assert_eq!(message, "Internal server error");
    assert!(!message.to_lowercase().contains("row"));

    let internal = AppError::Internal("secret stack trace".to_string());
    assert!(!internal.user_message().contains("secret"));
}

#[test]
fn test_storage_error_conversion() {
    assert!(matches!(
        AppError::from(StorageError::DuplicateUsername),
        AppError::UsernameTaken
    ));
    assert!(matches!(
        AppError::from(StorageError::Timeout),
        AppError::Storage(StorageError::Timeout)
    ));
}

#[test]
fn test_from_config_error() {
    let err = AppError::from(config::ConfigError::Message("missing".to_string()));
    assert!(matches!(err, AppError::Config(_)));
    assert_eq!(err.user_message(), "Configuration error");
}

// ==================== 错误序列化测试 ====================

#[test]
fn test_error_response_serialization() {
    let error_response = ErrorResponse {
        error: ErrorDetail {
            code: 404,
            message: "Resource not found".to_string(),
            request_id: "req-123".to_string(),
        },
    };

    let json_obj = serde_json::to_value(&error_response).unwrap();

    assert_eq!(json_obj["error"]["code"], 404);
    assert_eq!(json_obj["error"]["message"], "Resource not found");
    assert_eq!(json_obj["error"]["request_id"], "req-123");
}

#[tokio::test]
async fn test_into_response_body() {
    let response = AppError::ForbiddenOrNotFound.into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["error"]["code"], 404);
    assert_eq!(json["error"]["message"], "Resource not found");
    assert!(json["error"]["request_id"].is_string());
}

// ==================== 错误传播测试 ====================

#[test]
fn test_error_with_question_mark_operator() {
    fn lookup(found: bool) -> todo_service::error::Result<i64> {
        let outcome: Result<i64, StorageError> =
            if found { Ok(7) } else { Err(StorageError::DuplicateUsername) };
        Ok(outcome?)
    }

    assert_eq!(lookup(true).unwrap(), 7);
    assert!(matches!(lookup(false), Err(AppError::UsernameTaken)));
}
