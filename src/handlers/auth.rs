//! 注册与登录的 HTTP 处理器

use crate::{
    error::AppError,
    middleware::AppState,
    models::{
        todo::IdResponse,
        user::{SignInRequest, SignUpRequest, TokenResponse},
    },
};
use axum::{extract::State, Json};
use std::sync::Arc;

/// 注册
pub async fn sign_up(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignUpRequest>,
) -> Result<Json<IdResponse>, AppError> {
    let id = state.auth_service.register(req).await?;

    Ok(Json(IdResponse { id }))
}

/// 登录
pub async fn sign_in(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = state.auth_service.login(req).await?;

    Ok(Json(TokenResponse { token }))
}
