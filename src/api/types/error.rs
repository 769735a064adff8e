//! API error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::domain::{DomainError, LocalizedErrors};

/// Category reported in the `type` field of an error body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    ServerError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestError => write!(f, "invalid_request_error"),
            Self::ServerError => write!(f, "server_error"),
        }
    }
}

/// Error body: either localized per-field messages or a single error detail
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ApiErrorResponse {
    Validation {
        #[serde(rename = "validationErrors")]
        validation_errors: LocalizedErrors,
    },
    Error {
        error: ApiErrorDetail,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse::Error {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                    code: None,
                },
            },
        }
    }

    /// 400 carrying one localized message per rejected field
    pub fn validation(errors: LocalizedErrors) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            response: ApiErrorResponse::Validation {
                validation_errors: errors,
            },
        }
    }

    /// Add error code; no-op on validation bodies
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        if let ApiErrorResponse::Error { error } = &mut self.response {
            error.code = Some(code.into());
        }
        self
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ApiErrorType::ServerError, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        // Details stay in the log, never in the response
        error!(error = %err, "Request failed");
        Self::internal("Internal server error").with_code("internal_error")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.response {
            ApiErrorResponse::Validation { .. } => write!(f, "{}: validation failed", self.status),
            ApiErrorResponse::Error { error } => {
                write!(f, "{}: {}", error.error_type, error.message)
            }
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::Field;
    use crate::domain::{Locale, MessageCatalog, MessageId, ValidationErrors};

    fn detail(err: &ApiError) -> &ApiErrorDetail {
        match &err.response {
            ApiErrorResponse::Error { error } => error,
            other => panic!("expected error detail, got {:?}", other),
        }
    }

    #[test]
    fn test_api_error_creation() {
        let err = ApiError::new(
            StatusCode::BAD_REQUEST,
            ApiErrorType::InvalidRequestError,
            "Invalid JSON",
        );
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(detail(&err).error_type, ApiErrorType::InvalidRequestError);
        assert_eq!(detail(&err).message, "Invalid JSON");
    }

    #[test]
    fn test_with_code() {
        let err = ApiError::internal("Invalid value").with_code("invalid_type");
        assert_eq!(detail(&err).code.as_deref(), Some("invalid_type"));
    }

    #[test]
    fn test_storage_error_hides_details() {
        let api_err: ApiError =
            DomainError::storage("connection to 10.0.0.5:5432 refused").into();

        assert_eq!(api_err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(detail(&api_err).error_type, ApiErrorType::ServerError);

        let json = serde_json::to_string(&api_err.response).unwrap();
        assert!(!json.contains("10.0.0.5"));
        assert!(json.contains("Internal server error"));
    }

    #[test]
    fn test_validation_body_shape() {
        let catalog = MessageCatalog::embedded().unwrap();
        let mut errors = ValidationErrors::new();
        errors.push(Field::Password, MessageId::PasswordNull);
        errors.push(Field::Username, MessageId::UsernameNull);

        let err = ApiError::validation(errors.localize(&catalog, Locale::En));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let json = serde_json::to_string(&err.response).unwrap();
        assert_eq!(
            json,
            r#"{"validationErrors":{"username":"Username cannot be null","password":"Password cannot be null"}}"#
        );
    }

    #[test]
    fn test_error_serialization() {
        let err = ApiError::internal("boom");
        let json = serde_json::to_value(&err.response).unwrap();

        assert_eq!(json["error"]["type"], "server_error");
        assert_eq!(json["error"]["message"], "boom");
        assert!(json["error"].get("code").is_none());
    }
}
