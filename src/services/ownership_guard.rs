//! 资源归属检查
//!
//! A resource that does not exist and a resource owned by someone else are
//! the same outcome: `AppError::ForbiddenOrNotFound`.

use crate::{
    error::AppError,
    models::{todo::ResourceKind, user::UserId},
    repository::{bounded, OwnershipStore},
};
use std::{future::Future, sync::Arc, time::Duration};

pub struct OwnershipGuard {
    ownership: Arc<dyn OwnershipStore>,
    storage_timeout: Duration,
}

impl OwnershipGuard {
    pub fn new(ownership: Arc<dyn OwnershipStore>, storage_timeout: Duration) -> Self {
        Self {
            ownership,
            storage_timeout,
        }
    }

    /// 检查用户是否拥有该资源
    pub async fn authorize(
        &self,
        user_id: UserId,
        kind: ResourceKind,
        resource_id: i64,
    ) -> Result<bool, AppError> {
        let owned = bounded(
            self.storage_timeout,
            self.ownership.is_owner(user_id, kind, resource_id),
        )
        .await?;

        Ok(owned)
    }

    /// 检查归属，不属于调用者则返回错误
    pub async fn require(
        &self,
        user_id: UserId,
        kind: ResourceKind,
        resource_id: i64,
    ) -> Result<(), AppError> {
        if !self.authorize(user_id, kind, resource_id).await? {
            tracing::debug!(user_id, %kind, resource_id, "Ownership check failed");
            return Err(AppError::ForbiddenOrNotFound);
        }

        Ok(())
    }

    /// Guard first, then load. A row missing after a positive check (deleted
    /// concurrently) is also `ForbiddenOrNotFound`.
    pub async fn fetch_owned<T, F, Fut>(
        &self,
        user_id: UserId,
        kind: ResourceKind,
        resource_id: i64,
        fetch: F,
    ) -> Result<T, AppError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<T>, AppError>>,
    {
        self.require(user_id, kind, resource_id).await?;

        fetch().await?.ok_or(AppError::ForbiddenOrNotFound)
    }
}
