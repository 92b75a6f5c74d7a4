//! JWT 认证中间件

use crate::{
    auth::jwt::TokenCodec,
    error::{AppError, AuthError},
    models::user::UserId,
};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

const BEARER_PREFIX: &str = "bearer ";

/// 认证上下文（附加到请求扩展）
///
/// Only `jwt_auth_middleware` inserts it, so a handler holding one has a
/// token-verified identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: UserId,
}

// 实现 FromRequestParts 以便在 handler 中直接提取 AuthContext
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .copied()
            .ok_or(AppError::Auth(AuthError::MissingOrMalformedHeader))
    }
}

/// 从 Authorization 头的值中提取令牌
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let value = header.map(str::trim).unwrap_or_default();

    match value.get(..BEARER_PREFIX.len()) {
        Some(scheme) if scheme.eq_ignore_ascii_case(BEARER_PREFIX) => {
            let token = value[BEARER_PREFIX.len()..].trim();
            if token.is_empty() {
                Err(AuthError::MissingOrMalformedHeader)
            } else {
                Ok(token)
            }
        }
        _ => Err(AuthError::MissingOrMalformedHeader),
    }
}

/// Resolve the caller from a raw Authorization header value. The
/// `AuthError` kind from the codec is passed through unchanged.
pub fn extract_identity(header: Option<&str>, codec: &TokenCodec) -> Result<UserId, AuthError> {
    let token = bearer_token(header)?;
    codec.verify(token)
}

/// 从请求头提取令牌
pub fn extract_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = match headers.get(AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| AuthError::MissingOrMalformedHeader)?),
        None => None,
    };

    bearer_token(header)
}

/// JWT 认证中间件 - 必须认证
pub async fn jwt_auth_middleware(
    State(codec): State<Arc<TokenCodec>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user_id = extract_token(req.headers())
        .and_then(|token| codec.verify(token))
        .map_err(|kind| {
            tracing::debug!(reason = %kind, uri = %req.uri(), "Request authentication failed");
            AppError::Auth(kind)
        })?;

    // 附加到请求扩展
    req.extensions_mut().insert(AuthContext { user_id });

    Ok(next.run(req).await)
}
