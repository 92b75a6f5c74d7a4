//! 条目服务

use super::OwnershipGuard;
use crate::{
    error::AppError,
    models::{
        todo::{CreateItemRequest, ResourceKind, TodoItem, UpdateItemRequest},
        user::UserId,
    },
    repository::{bounded, ItemStore},
};
use std::{sync::Arc, time::Duration};
use validator::Validate;

pub struct ItemService {
    items: Arc<dyn ItemStore>,
    guard: Arc<OwnershipGuard>,
    storage_timeout: Duration,
}

impl ItemService {
    pub fn new(
        items: Arc<dyn ItemStore>,
        guard: Arc<OwnershipGuard>,
        storage_timeout: Duration,
    ) -> Self {
        Self {
            items,
            guard,
            storage_timeout,
        }
    }

    /// 在调用者的清单中创建条目
    pub async fn create(
        &self,
        user_id: UserId,
        list_id: i64,
        req: CreateItemRequest,
    ) -> Result<i64, AppError> {
        req.validate()?;

        self.guard.require(user_id, ResourceKind::List, list_id).await?;

        let item_id = bounded(self.storage_timeout, self.items.create(list_id, &req)).await?;

        tracing::info!(user_id, list_id, item_id, "Item created");
        Ok(item_id)
    }

    /// 清单内的全部条目
    pub async fn all(&self, user_id: UserId, list_id: i64) -> Result<Vec<TodoItem>, AppError> {
        self.guard.require(user_id, ResourceKind::List, list_id).await?;

        let items = bounded(self.storage_timeout, self.items.list_in(list_id)).await?;
        Ok(items)
    }

    pub async fn get(&self, user_id: UserId, item_id: i64) -> Result<TodoItem, AppError> {
        self.guard
            .fetch_owned(user_id, ResourceKind::Item, item_id, || async move {
                bounded(self.storage_timeout, self.items.get(user_id, item_id))
                    .await
                    .map_err(AppError::from)
            })
            .await
    }

    pub async fn update(
        &self,
        user_id: UserId,
        item_id: i64,
        req: UpdateItemRequest,
    ) -> Result<(), AppError> {
        if req.is_empty() {
            return Err(AppError::validation("update structure has no values"));
        }
        req.validate()?;

        self.guard.require(user_id, ResourceKind::Item, item_id).await?;

        let updated =
            bounded(self.storage_timeout, self.items.update(user_id, item_id, &req)).await?;
        if !updated {
            return Err(AppError::ForbiddenOrNotFound);
        }

        tracing::info!(user_id, item_id, "Item updated");
        Ok(())
    }

    pub async fn delete(&self, user_id: UserId, item_id: i64) -> Result<(), AppError> {
        self.guard.require(user_id, ResourceKind::Item, item_id).await?;

        let deleted = bounded(self.storage_timeout, self.items.delete(user_id, item_id)).await?;
        if !deleted {
            return Err(AppError::ForbiddenOrNotFound);
        }

        tracing::info!(user_id, item_id, "Item deleted");
        Ok(())
    }
}
