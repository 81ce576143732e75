//! 核心错误处理模块

use async_graphql::ErrorExtensions;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// 核心错误类型
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// 输入校验失败：重复邮箱、电话格式、价格、库存、空产品列表
    #[error("{0}")]
    Validation(String),
    /// 引用的客户或产品不存在
    #[error("{0}")]
    NotFound(String),
    #[cfg(feature = "database")]
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        CoreError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        CoreError::NotFound(msg.into())
    }

    /// 对外暴露的错误码
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::Validation(_) => "VALIDATION_ERROR",
            CoreError::NotFound(_) => "NOT_FOUND",
            #[cfg(feature = "database")]
            CoreError::Database(_) => "INTERNAL_SERVER_ERROR",
            CoreError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// 对外暴露的错误消息，基础设施错误只记录日志不外泄细节
    pub fn public_message(&self) -> String {
        match self {
            CoreError::Validation(msg) | CoreError::NotFound(msg) => msg.clone(),
            #[cfg(feature = "database")]
            CoreError::Database(e) => {
                error!("Database error: {}", e);
                "Database error".to_string()
            }
            CoreError::Internal(msg) => {
                error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            CoreError::Validation(_) => StatusCode::BAD_REQUEST,
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            #[cfg(feature = "database")]
            CoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(feature = "database")]
impl From<sqlx::Error> for CoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            // customers.email 是唯一带 UNIQUE 约束的业务列
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                CoreError::Validation("Email already exists".to_string())
            }
            _ => CoreError::Database(err),
        }
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .into_iter()
            .flat_map(|(_, errors)| {
                errors.iter().map(|error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| "Validation error".to_string())
                })
            })
            .collect();
        messages.sort();

        CoreError::Validation(messages.join(", "))
    }
}

impl ErrorExtensions for CoreError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code();
        async_graphql::Error::new(self.public_message()).extend_with(|_, e| e.set("code", code))
    }
}

/// 错误响应结构
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    pub timestamp: String,
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_response = ErrorResponse {
            error: self.code().to_string(),
            message: self.public_message(),
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, axum::Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CoreError::validation("x").code(), "VALIDATION_ERROR");
        assert_eq!(CoreError::not_found("x").code(), "NOT_FOUND");
        assert_eq!(CoreError::Internal("x".into()).code(), "INTERNAL_SERVER_ERROR");
    }

    #[test]
    fn test_internal_message_is_hidden() {
        let err = CoreError::Internal("lock poisoned at store.rs:42".into());
        assert_eq!(err.public_message(), "Internal server error");

        let err = CoreError::validation("Price must be positive");
        assert_eq!(err.public_message(), "Price must be positive");
    }

    #[test]
    fn test_graphql_extension_carries_code() {
        let err = CoreError::not_found("Invalid customer ID").extend();
        assert_eq!(err.message, "Invalid customer ID");
        let extensions = serde_json::to_value(&err.extensions).unwrap();
        assert_eq!(extensions["code"], "NOT_FOUND");
    }
}
