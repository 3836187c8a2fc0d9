//! 用户处理器

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Json,
};
use tracing::debug;

use super::model::{User, UserPayload};
use crate::app::AppState;
use crate::core::error::{ApiError, ApiResult};
use crate::core::response::{CreatedResponse, MessageResponse};

fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.parse().map_err(|_| ApiError::invalid_id())
}

/// 路径段不是合法 UTF-8 时 axum 会先拒绝，同样按无效 id 处理
fn path_id(path: Result<Path<String>, PathRejection>) -> ApiResult<i64> {
    let Path(raw) = path.map_err(|rejection| {
        debug!(%rejection, "rejected path id");
        ApiError::invalid_id()
    })?;
    parse_id(&raw)
}

fn parse_body(body: Result<Json<UserPayload>, JsonRejection>) -> ApiResult<UserPayload> {
    body.map(|Json(payload)| payload).map_err(|rejection| {
        debug!(%rejection, "rejected request body");
        ApiError::invalid_body()
    })
}

pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<User>> {
    let id = path_id(path)?;
    let user = state.user_service.get_user(id).await?;
    Ok(Json(user))
}

pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<UserPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let payload = parse_body(body)?;
    let id = state.user_service.create_user(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new("User created successfully", id)),
    ))
}

pub async fn update_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<UserPayload>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let id = path_id(path)?;
    let payload = parse_body(body)?;
    state.user_service.update_user(id, payload).await?;
    Ok(Json(MessageResponse::new("User updated successfully")))
}

pub async fn delete_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let id = path_id(path)?;
    state.user_service.delete_user(id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}

pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    state.user_service.health().await?;
    Ok(Json(serde_json::json!({
        "status": "healthy",
        "storage": state.user_service.backend(),
    })))
}
