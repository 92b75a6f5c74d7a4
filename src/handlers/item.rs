//! 条目的 HTTP 处理器

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::todo::{CreateItemRequest, IdResponse, StatusResponse, TodoItem, UpdateItemRequest},
};
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

/// 在清单中创建条目
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(list_id): Path<i64>,
    Json(req): Json<CreateItemRequest>,
) -> Result<Json<IdResponse>, AppError> {
    let id = state
        .item_service
        .create(auth_context.user_id, list_id, req)
        .await?;

    Ok(Json(IdResponse { id }))
}

/// 列出清单内的条目
pub async fn list_items(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(list_id): Path<i64>,
) -> Result<Json<Vec<TodoItem>>, AppError> {
    let items = state
        .item_service
        .all(auth_context.user_id, list_id)
        .await?;

    Ok(Json(items))
}

pub async fn get_item(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<i64>,
) -> Result<Json<TodoItem>, AppError> {
    let item = state.item_service.get(auth_context.user_id, id).await?;

    Ok(Json(item))
}

pub async fn update_item(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<i64>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    state
        .item_service
        .update(auth_context.user_id, id, req)
        .await?;

    Ok(Json(StatusResponse::ok()))
}

pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<i64>,
) -> Result<Json<StatusResponse>, AppError> {
    state.item_service.delete(auth_context.user_id, id).await?;

    Ok(Json(StatusResponse::ok()))
}
