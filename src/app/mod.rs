//! 业务模块

pub mod users;

use axum::{routing::get, Router};

use users::{handler, UserService};

#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
}

impl AppState {
    pub fn new(user_service: UserService) -> Self {
        Self { user_service }
    }
}

/// 用户 CRUD 路由
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handler::health_check))
        .route("/users", get(handler::list_users).post(handler::create_user))
        .route(
            "/users/:id",
            get(handler::get_user)
                .put(handler::update_user)
                .delete(handler::delete_user),
        )
}
