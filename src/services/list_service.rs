//! 清单服务

use super::OwnershipGuard;
use crate::{
    error::AppError,
    models::{
        todo::{CreateListRequest, ResourceKind, TodoList, UpdateListRequest},
        user::UserId,
    },
    repository::{bounded, ListStore},
};
use std::{sync::Arc, time::Duration};
use validator::Validate;

pub struct ListService {
    lists: Arc<dyn ListStore>,
    guard: Arc<OwnershipGuard>,
    storage_timeout: Duration,
}

impl ListService {
    pub fn new(
        lists: Arc<dyn ListStore>,
        guard: Arc<OwnershipGuard>,
        storage_timeout: Duration,
    ) -> Self {
        Self {
            lists,
            guard,
            storage_timeout,
        }
    }

    /// 创建清单，调用者成为所有者
    pub async fn create(&self, user_id: UserId, req: CreateListRequest) -> Result<i64, AppError> {
        req.validate()?;

        let list_id = bounded(self.storage_timeout, self.lists.create(user_id, &req)).await?;

        tracing::info!(user_id, list_id, "List created");
        Ok(list_id)
    }

    /// 调用者的全部清单
    pub async fn all(&self, user_id: UserId) -> Result<Vec<TodoList>, AppError> {
        let lists = bounded(self.storage_timeout, self.lists.list_for_owner(user_id)).await?;
        Ok(lists)
    }

    pub async fn get(&self, user_id: UserId, list_id: i64) -> Result<TodoList, AppError> {
        self.guard
            .fetch_owned(user_id, ResourceKind::List, list_id, || async move {
                bounded(self.storage_timeout, self.lists.get(user_id, list_id))
                    .await
                    .map_err(AppError::from)
            })
            .await
    }

    pub async fn update(
        &self,
        user_id: UserId,
        list_id: i64,
        req: UpdateListRequest,
    ) -> Result<(), AppError> {
        if req.is_empty() {
            return Err(AppError::validation("update structure has no values"));
        }
        req.validate()?;

        self.guard.require(user_id, ResourceKind::List, list_id).await?;

        let updated =
            bounded(self.storage_timeout, self.lists.update(user_id, list_id, &req)).await?;
        if !updated {
            return Err(AppError::ForbiddenOrNotFound);
        }

        tracing::info!(user_id, list_id, "List updated");
        Ok(())
    }

    /// 删除清单及其全部条目
    pub async fn delete(&self, user_id: UserId, list_id: i64) -> Result<(), AppError> {
        self.guard.require(user_id, ResourceKind::List, list_id).await?;

        let deleted = bounded(self.storage_timeout, self.lists.delete(user_id, list_id)).await?;
        if !deleted {
            return Err(AppError::ForbiddenOrNotFound);
        }

        tracing::info!(user_id, list_id, "List deleted");
        Ok(())
    }
}
