//! 核心中间件模块

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
    BoxError,
};
use std::any::Any;
use std::time::Instant;
use tracing::{error, info};
use uuid::Uuid;

use super::error::ApiError;

pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// 请求日志中间件
///
/// 沿用客户端传入的 `x-request-id`，没有则生成一个，并在响应头中回写。
pub async fn request_logging_middleware(mut req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let request_id = req
        .headers()
        .get(&REQUEST_ID_HEADER)
        .cloned()
        .or_else(|| HeaderValue::from_str(&Uuid::new_v4().to_string()).ok());
    if let Some(id) = &request_id {
        req.headers_mut().insert(REQUEST_ID_HEADER.clone(), id.clone());
    }

    let mut response = next.run(req).await;
    let status = response.status();
    let duration = start.elapsed();

    let id_for_log = request_id
        .as_ref()
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-")
        .to_string();
    info!(
        request_id = %id_for_log,
        "{} {} - {} - {}ms",
        method,
        uri,
        status,
        duration.as_millis()
    );

    if let Some(id) = request_id {
        response.headers_mut().insert(REQUEST_ID_HEADER.clone(), id);
    }
    response
}

/// `CatchPanicLayer` 的响应：panic 信息只进日志
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = %detail, "handler panicked");

    ApiError::Internal("Internal server error".to_string()).into_response()
}

/// 超时等中间件错误转换为统一的错误响应
pub async fn handle_layer_error(err: BoxError) -> ApiError {
    if err.is::<tower::timeout::error::Elapsed>() {
        ApiError::Timeout("Request timeout".to_string())
    } else {
        error!(error = %err, "unhandled middleware error");
        ApiError::Internal("Internal server error".to_string())
    }
}
