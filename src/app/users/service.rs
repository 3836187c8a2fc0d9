//! 用户业务服务

use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};

use super::model::{User, UserPayload};
use super::store::{StoreError, UserStore};
use crate::core::error::{ApiError, ApiResult};

const EMAIL_REGISTERED: &str = "Email already registered";
const EMAIL_TAKEN: &str = "Email already taken by another user";

/// 存储错误只记日志，客户端只拿到通用信息
fn store_failure(message: &'static str) -> impl FnOnce(StoreError) -> ApiError {
    move |err| {
        error!(error = %err, "{message}");
        ApiError::store(message)
    }
}

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    pub async fn health(&self) -> ApiResult<()> {
        self.store.ping().await.map_err(|err| {
            error!(error = %err, "storage health check failed");
            ApiError::Unavailable("Storage unavailable".to_string())
        })
    }

    pub async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.store
            .list()
            .await
            .map_err(store_failure("Failed to fetch users"))
    }

    pub async fn get_user(&self, id: i64) -> ApiResult<User> {
        self.store
            .find(id)
            .await
            .map_err(store_failure("Failed to fetch user"))?
            .ok_or_else(ApiError::user_not_found)
    }

    /// 校验 → 查重 → 插入，返回新 id
    pub async fn create_user(&self, payload: UserPayload) -> ApiResult<i64> {
        let fields = payload.into_fields()?;

        let taken = self
            .store
            .email_taken(&fields.email, None)
            .await
            .map_err(store_failure("Failed to check email availability"))?;
        if taken {
            return Err(ApiError::Conflict(EMAIL_REGISTERED.to_string()));
        }

        let id = match self.store.insert(&fields, Utc::now()).await {
            Ok(id) => id,
            // 并发请求在查重之后抢先写入
            Err(StoreError::UniqueViolation) => {
                return Err(ApiError::Conflict(EMAIL_REGISTERED.to_string()))
            }
            Err(err) => return Err(store_failure("Failed to create user")(err)),
        };

        info!(user_id = id, "created user");
        Ok(id)
    }

    pub async fn update_user(&self, id: i64, payload: UserPayload) -> ApiResult<()> {
        let fields = payload.into_fields()?;

        // 查询失败也按不存在处理
        match self.store.exists(id).await {
            Ok(true) => {}
            Ok(false) => return Err(ApiError::user_not_found()),
            Err(err) => {
                error!(error = %err, user_id = id, "failed to check user existence");
                return Err(ApiError::user_not_found());
            }
        }

        let taken = self
            .store
            .email_taken(&fields.email, Some(id))
            .await
            .map_err(store_failure("Failed to check email availability"))?;
        if taken {
            return Err(ApiError::Conflict(EMAIL_TAKEN.to_string()));
        }

        let affected = match self.store.update(id, &fields, Utc::now()).await {
            Ok(affected) => affected,
            Err(StoreError::UniqueViolation) => {
                return Err(ApiError::Conflict(EMAIL_TAKEN.to_string()))
            }
            Err(err) => return Err(store_failure("Failed to update user")(err)),
        };
        if affected == 0 {
            return Err(ApiError::user_not_found());
        }

        info!(user_id = id, "updated user");
        Ok(())
    }

    pub async fn delete_user(&self, id: i64) -> ApiResult<()> {
        let affected = self
            .store
            .delete(id)
            .await
            .map_err(store_failure("Failed to delete user"))?;
        if affected == 0 {
            return Err(ApiError::user_not_found());
        }

        info!(user_id = id, "deleted user");
        Ok(())
    }
}
