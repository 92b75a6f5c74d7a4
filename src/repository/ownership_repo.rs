//! Ownership repository (归属关系查询)

use super::OwnershipStore;
use crate::{
    error::StorageError,
    models::{todo::ResourceKind, user::UserId},
};
use async_trait::async_trait;
use sqlx::PgPool;

pub struct OwnershipRepository {
    db: PgPool,
}

impl OwnershipRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OwnershipStore for OwnershipRepository {
    async fn is_owner(
        &self,
        user_id: UserId,
        kind: ResourceKind,
        resource_id: i64,
    ) -> Result<bool, StorageError> {
        let sql = match kind {
            ResourceKind::List => {
                r#"
                SELECT EXISTS (
                    SELECT 1 FROM users_lists
                    WHERE user_id = $1 AND list_id = $2
                )
                "#
            }
            // 条目归属于其所在清单的所有者
            ResourceKind::Item => {
                r#"
                SELECT EXISTS (
                    SELECT 1
                    FROM lists_items li
                    JOIN users_lists ul ON ul.list_id = li.list_id
                    WHERE ul.user_id = $1 AND li.item_id = $2
                )
                "#
            }
        };

        let owned: bool = sqlx::query_scalar(sql)
            .bind(user_id)
            .bind(resource_id)
            .fetch_one(&self.db)
            .await?;

        Ok(owned)
    }
}
