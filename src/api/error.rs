use std::fmt;

use crate::api::event::ProxyResponse;
use crate::models::ErrorResponse;
use crate::storage::StorageError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Internal(String),
    Storage(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Internal(_) | ApiError::Storage(_) => 500,
        }
    }

    /// The client-facing message, serialized as `{"Error": ...}`.
    fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Internal(msg)
            | ApiError::Storage(msg) => msg,
        }
    }

    pub fn to_response(&self, allowed_methods: &str) -> ProxyResponse {
        ProxyResponse::json(
            self.status_code(),
            &ErrorResponse {
                error: self.message().to_string(),
            },
            allowed_methods,
        )
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidRecord(msg) => ApiError::Internal(msg),
            other => ApiError::Storage(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(format!("JSON error: {}", err))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::event::ALLOW_POST;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::BadRequest("x".into()).status_code(), 400);
        assert_eq!(ApiError::Unauthorized("x".into()).status_code(), 401);
        assert_eq!(ApiError::Internal("x".into()).status_code(), 500);
        assert_eq!(ApiError::Storage("x".into()).status_code(), 500);
    }

    #[test]
    fn test_error_body_shape() {
        let response = ApiError::Unauthorized("nope".into()).to_response(ALLOW_POST);
        assert_eq!(response.status_code, 401);
        assert_eq!(response.body, r#"{"Error":"nope"}"#);
    }
}
