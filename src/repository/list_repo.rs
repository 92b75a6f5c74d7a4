//! Todo list repository (清单数据访问)

use super::ListStore;
use crate::{
    error::StorageError,
    models::{
        todo::{CreateListRequest, TodoList, UpdateListRequest},
        user::UserId,
    },
};
use async_trait::async_trait;
use sqlx::PgPool;

pub struct ListRepository {
    db: PgPool,
}

impl ListRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ListStore for ListRepository {
    /// 创建清单并在同一事务中记录所有者
    async fn create(&self, owner: UserId, req: &CreateListRequest) -> Result<i64, StorageError> {
        let mut tx = self.db.begin().await?;

        let list_id: i64 = sqlx::query_scalar(
            "INSERT INTO todo_lists (title, description) VALUES ($1, $2) RETURNING id",
        )
        .bind(&req.title)
        .bind(&req.description)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO users_lists (user_id, list_id) VALUES ($1, $2)")
            .bind(owner)
            .bind(list_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(list_id)
    }

    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<TodoList>, StorageError> {
        let lists = sqlx::query_as::<_, TodoList>(
            r#"
            SELECT tl.id, tl.title, tl.description
            FROM todo_lists tl
            JOIN users_lists ul ON ul.list_id = tl.id
            WHERE ul.user_id = $1
            ORDER BY tl.id
            "#,
        )
        .bind(owner)
        .fetch_all(&self.db)
        .await?;

        Ok(lists)
    }

    async fn get(&self, owner: UserId, list_id: i64) -> Result<Option<TodoList>, StorageError> {
        let list = sqlx::query_as::<_, TodoList>(
            r#"
            SELECT tl.id, tl.title, tl.description
            FROM todo_lists tl
            JOIN users_lists ul ON ul.list_id = tl.id
            WHERE ul.user_id = $1 AND tl.id = $2
            "#,
        )
        .bind(owner)
        .bind(list_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(list)
    }

    async fn update(
        &self,
        owner: UserId,
        list_id: i64,
        req: &UpdateListRequest,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query(
            r#"
            UPDATE todo_lists tl
            SET
                title = COALESCE($3, tl.title),
                description = COALESCE($4, tl.description)
            FROM users_lists ul
            WHERE ul.list_id = tl.id AND ul.user_id = $1 AND tl.id = $2
            "#,
        )
        .bind(owner)
        .bind(list_id)
        .bind(&req.title)
        .bind(&req.description)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, owner: UserId, list_id: i64) -> Result<bool, StorageError> {
        let mut tx = self.db.begin().await?;

        // 先删除清单内的条目，lists_items 行随之级联删除
        sqlx::query(
            r#"
            DELETE FROM todo_items
            WHERE id IN (
                SELECT li.item_id
                FROM lists_items li
                JOIN users_lists ul ON ul.list_id = li.list_id
                WHERE ul.user_id = $1 AND li.list_id = $2
            )
            "#,
        )
        .bind(owner)
        .bind(list_id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query(
            r#"
            DELETE FROM todo_lists tl
            USING users_lists ul
            WHERE ul.list_id = tl.id AND ul.user_id = $1 AND tl.id = $2
            "#,
        )
        .bind(owner)
        .bind(list_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}
