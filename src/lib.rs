//! # 用户 CRUD 服务
//!
//! 基于 Axum + SQLx 的单资源 REST 服务：
//! - `GET/POST /users`、`GET/PUT/DELETE /users/:id`
//! - 字段校验、email 唯一（预检查 + 数据库唯一约束）
//! - PostgreSQL 存储，未配置数据库时退回内存存储

pub mod app;
pub mod core;
pub mod infrastructure;

use axum::{error_handling::HandleErrorLayer, middleware, Router};
use std::sync::Arc;
use std::time::Duration;
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use app::users::{MemoryUserStore, PgUserStore, UserService, UserStore};
use app::AppState;
use infrastructure::{config::DatabaseConfig, database::DatabaseManager};

/// 组装完整应用：路由 + 中间件
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    with_middleware(app::routes(), request_timeout).with_state(state)
}

/// 超时和 panic 也返回 `{"error": ...}`
pub fn with_middleware<S>(router: Router<S>, request_timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let layers = ServiceBuilder::new()
        .layer(middleware::from_fn(
            crate::core::middleware::request_logging_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(HandleErrorLayer::new(crate::core::middleware::handle_layer_error))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CatchPanicLayer::custom(crate::core::middleware::panic_response));

    router.layer(layers)
}

/// 根据配置创建存储：有 `url` 用 PostgreSQL，否则用内存
pub async fn build_store(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn UserStore>> {
    let Some(url) = config.url.as_deref() else {
        warn!("DATABASE_URL not set, using in-memory storage (data is lost on restart)");
        return Ok(Arc::new(MemoryUserStore::new()));
    };

    info!(
        "Connecting to database: {}",
        config.masked_url().unwrap_or_default()
    );
    let database = DatabaseManager::connect(url, config).await?;
    if config.auto_migrate {
        database.ensure_schema().await?;
    }

    Ok(Arc::new(PgUserStore::new(database.into_pool())))
}

/// 用给定存储构造应用状态
pub fn app_state(store: Arc<dyn UserStore>) -> AppState {
    AppState::new(UserService::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get};
    use axum_test::TestServer;
    use serde_json::{json, Value};

    async fn slow() -> &'static str {
        tokio::time::sleep(Duration::from_secs(2)).await;
        "done"
    }

    async fn boom() -> &'static str {
        panic!("boom")
    }

    fn server() -> TestServer {
        let router = Router::new()
            .route("/slow", get(slow))
            .route("/boom", get(boom));
        TestServer::new(with_middleware(router, Duration::from_millis(50))).unwrap()
    }

    #[tokio::test]
    async fn timeout_returns_json_error() {
        let response = server().get("/slow").await;
        response.assert_status(StatusCode::REQUEST_TIMEOUT);
        assert_eq!(response.json::<Value>(), json!({ "error": "Request timeout" }));
    }

    #[tokio::test]
    async fn panic_returns_json_error() {
        let response = server().get("/boom").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<Value>(),
            json!({ "error": "Internal server error" })
        );
    }
}
