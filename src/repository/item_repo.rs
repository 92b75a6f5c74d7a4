//! Todo item repository (条目数据访问)

use super::ItemStore;
use crate::{
    error::StorageError,
    models::{
        todo::{CreateItemRequest, TodoItem, UpdateItemRequest},
        user::UserId,
    },
};
use async_trait::async_trait;
use sqlx::PgPool;

pub struct ItemRepository {
    db: PgPool,
}

impl ItemRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemStore for ItemRepository {
    /// 创建条目并在同一事务中关联到清单
    async fn create(&self, list_id: i64, req: &CreateItemRequest) -> Result<i64, StorageError> {
        let mut tx = self.db.begin().await?;

        let item_id: i64 = sqlx::query_scalar(
            "INSERT INTO todo_items (title, description, done) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.done)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO lists_items (list_id, item_id) VALUES ($1, $2)")
            .bind(list_id)
            .bind(item_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(item_id)
    }

    async fn list_in(&self, list_id: i64) -> Result<Vec<TodoItem>, StorageError> {
        let items = sqlx::query_as::<_, TodoItem>(
            r#"
            SELECT ti.id, ti.title, ti.description, ti.done
            FROM todo_items ti
            JOIN lists_items li ON li.item_id = ti.id
            WHERE li.list_id = $1
            ORDER BY ti.id
            "#,
        )
        .bind(list_id)
        .fetch_all(&self.db)
        .await?;

        Ok(items)
    }

    async fn get(&self, owner: UserId, item_id: i64) -> Result<Option<TodoItem>, StorageError> {
        let item = sqlx::query_as::<_, TodoItem>(
            r#"
            SELECT ti.id, ti.title, ti.description, ti.done
            FROM todo_items ti
            JOIN lists_items li ON li.item_id = ti.id
            JOIN users_lists ul ON ul.list_id = li.list_id
            WHERE ul.user_id = $1 AND ti.id = $2
            "#,
        )
        .bind(owner)
        .bind(item_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(item)
    }

    async fn update(
        &self,
        owner: UserId,
        item_id: i64,
        req: &UpdateItemRequest,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query(
            r#"
            UPDATE todo_items ti
            SET
                title = COALESCE($3, ti.title),
                description = COALESCE($4, ti.description),
                done = COALESCE($5, ti.done)
            FROM lists_items li
            JOIN users_lists ul ON ul.list_id = li.list_id
            WHERE li.item_id = ti.id AND ul.user_id = $1 AND ti.id = $2
            "#,
        )
        .bind(owner)
        .bind(item_id)
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.done)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, owner: UserId, item_id: i64) -> Result<bool, StorageError> {
        let result = sqlx::query(
            r#"
            DELETE FROM todo_items ti
            USING lists_items li, users_lists ul
            WHERE li.item_id = ti.id
              AND ul.list_id = li.list_id
              AND ul.user_id = $1
              AND ti.id = $2
            "#,
        )
        .bind(owner)
        .bind(item_id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
