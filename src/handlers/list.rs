//! 清单的 HTTP 处理器

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::todo::{
        CreateListRequest, IdResponse, ListCollection, StatusResponse, TodoList,
        UpdateListRequest,
    },
};
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

/// 创建清单
pub async fn create_list(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(req): Json<CreateListRequest>,
) -> Result<Json<IdResponse>, AppError> {
    let id = state
        .list_service
        .create(auth_context.user_id, req)
        .await?;

    Ok(Json(IdResponse { id }))
}

/// 列出调用者的清单
pub async fn list_lists(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<Json<ListCollection>, AppError> {
    let data = state.list_service.all(auth_context.user_id).await?;

    Ok(Json(ListCollection { data }))
}

/// 获取清单详情
pub async fn get_list(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<i64>,
) -> Result<Json<TodoList>, AppError> {
    let list = state.list_service.get(auth_context.user_id, id).await?;

    Ok(Json(list))
}

/// 更新清单
pub async fn update_list(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<i64>,
    Json(req): Json<UpdateListRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    state
        .list_service
        .update(auth_context.user_id, id, req)
        .await?;

    Ok(Json(StatusResponse::ok()))
}

/// 删除清单
pub async fn delete_list(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<i64>,
) -> Result<Json<StatusResponse>, AppError> {
    state.list_service.delete(auth_context.user_id, id).await?;

    Ok(Json(StatusResponse::ok()))
}
