//! 用户存储接口

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use super::model::{User, UserFields};

/// PostgreSQL unique_violation
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum StoreError {
    /// email 唯一约束冲突
    #[error("email already exists")]
    UniqueViolation,
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                return StoreError::UniqueViolation;
            }
        }
        StoreError::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// 持久化句柄，跨请求共享
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 存储后端名称，用于健康检查
    fn backend(&self) -> &'static str;

    async fn ping(&self) -> StoreResult<()>;

    /// 按 id 升序返回所有用户
    async fn list(&self) -> StoreResult<Vec<User>>;

    async fn find(&self, id: i64) -> StoreResult<Option<User>>;

    async fn exists(&self, id: i64) -> StoreResult<bool>;

    /// email 是否已被占用；`exclude` 为更新时的当前用户 id
    async fn email_taken(&self, email: &str, exclude: Option<i64>) -> StoreResult<bool>;

    /// 插入新用户，返回分配的 id
    async fn insert(&self, fields: &UserFields, now: DateTime<Utc>) -> StoreResult<i64>;

    /// 返回受影响行数
    async fn update(&self, id: i64, fields: &UserFields, now: DateTime<Utc>) -> StoreResult<u64>;

    /// 返回受影响行数
    async fn delete(&self, id: i64) -> StoreResult<u64>;
}
