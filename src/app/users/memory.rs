//! 内存存储，未配置数据库时使用

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::model::{User, UserFields};
use super::store::{StoreError, StoreResult, UserStore};

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, User>,
    last_id: i64,
}

impl Table {
    fn email_taken(&self, email: &str, exclude: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|user| user.email == email && Some(user.id) != exclude)
    }
}

/// 与 users 表语义一致：id 自增且不复用，email 唯一
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    table: Arc<Mutex<Table>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        let table = self.table.lock().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find(&self, id: i64) -> StoreResult<Option<User>> {
        let table = self.table.lock().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn exists(&self, id: i64) -> StoreResult<bool> {
        let table = self.table.lock().await;
        Ok(table.rows.contains_key(&id))
    }

    async fn email_taken(&self, email: &str, exclude: Option<i64>) -> StoreResult<bool> {
        let table = self.table.lock().await;
        Ok(table.email_taken(email, exclude))
    }

    async fn insert(&self, fields: &UserFields, now: DateTime<Utc>) -> StoreResult<i64> {
        let mut table = self.table.lock().await;
        if table.email_taken(&fields.email, None) {
            return Err(StoreError::UniqueViolation);
        }

        table.last_id += 1;
        let id = table.last_id;
        table.rows.insert(
            id,
            User {
                id,
                name: fields.name.clone(),
                email: fields.email.clone(),
                age: fields.age,
                created_at: now,
                updated_at: now,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: i64, fields: &UserFields, now: DateTime<Utc>) -> StoreResult<u64> {
        let mut table = self.table.lock().await;
        if table.email_taken(&fields.email, Some(id)) {
            return Err(StoreError::UniqueViolation);
        }

        let Some(user) = table.rows.get_mut(&id) else {
            return Ok(0);
        };
        user.name = fields.name.clone();
        user.email = fields.email.clone();
        user.age = fields.age;
        user.updated_at = now;
        Ok(1)
    }

    async fn delete(&self, id: i64) -> StoreResult<u64> {
        let mut table = self.table.lock().await;
        Ok(u64::from(table.rows.remove(&id).is_some()))
    }
}
