//! 核心响应处理模块

use serde::Serialize;

/// 只带提示信息的响应
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// 创建成功响应，附带新分配的 id
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: i64,
}

impl CreatedResponse {
    pub fn new(message: &str, id: i64) -> Self {
        Self {
            message: message.to_string(),
            id,
        }
    }
}
