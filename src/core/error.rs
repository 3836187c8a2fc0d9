//! 核心错误处理模块
//!
//! 所有处理器都返回 `ApiError`，响应体统一为 `{"error": "<message>"}`。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// 核心错误类型
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// 请求体不是合法 JSON，或路径 id 不是整数
    #[error("{0}")]
    MalformedInput(String),
    /// 字段校验失败
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    /// 邮箱冲突
    #[error("{0}")]
    Conflict(String),
    /// 存储层失败，只返回通用信息
    #[error("{0}")]
    Store(String),
    #[error("{0}")]
    Unavailable(String),
    #[error("{0}")]
    Timeout(String),
    /// 处理器 panic 等未预期的失败
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn invalid_id() -> Self {
        ApiError::MalformedInput("Invalid user ID".to_string())
    }

    pub fn invalid_body() -> Self {
        ApiError::MalformedInput("Invalid request body".to_string())
    }

    pub fn user_not_found() -> Self {
        ApiError::NotFound("User not found".to_string())
    }

    pub fn store(message: &str) -> Self {
        ApiError::Store(message.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedInput(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
