//! 认证服务：注册、登录

use crate::{
    auth::{jwt::TokenCodec, password::CredentialHasher},
    error::AppError,
    models::user::{SignInRequest, SignUpRequest, UserId},
    repository::{bounded, UserStore},
};
use std::{sync::Arc, time::Duration};
use validator::Validate;

pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Arc<CredentialHasher>,
    tokens: Arc<TokenCodec>,
    storage_timeout: Duration,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<CredentialHasher>,
        tokens: Arc<TokenCodec>,
        storage_timeout: Duration,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            storage_timeout,
        }
    }

    /// 用户注册
    pub async fn register(&self, req: SignUpRequest) -> Result<UserId, AppError> {
        req.validate()?;

        let password_hash = self.hasher.hash(&req.password);

        let user_id = bounded(
            self.storage_timeout,
            self.users.create_user(&req.name, &req.username, &password_hash),
        )
        .await?;

        tracing::info!(user_id, username = %req.username, "User registered");

        Ok(user_id)
    }

    /// 用户登录，成功后签发会话令牌
    ///
    /// Unknown username and wrong password return the same
    /// `InvalidCredentials` so callers cannot probe for accounts.
    pub async fn login(&self, req: SignInRequest) -> Result<String, AppError> {
        req.validate()?;

        let user = bounded(self.storage_timeout, self.users.find_by_username(&req.username))
            .await?;

        let user = match user {
            Some(user) if self.hasher.matches(&req.password, &user.password_hash) => user,
            _ => {
                tracing::debug!(username = %req.username, "Login rejected");
                return Err(AppError::InvalidCredentials);
            }
        };

        let token = self.tokens.issue(user.id)?;

        tracing::info!(user_id = user.id, "User logged in");

        Ok(token)
    }
}
