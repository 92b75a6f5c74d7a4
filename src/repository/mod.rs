//! Database repository layer
//!
//! The services only see the `*Store` traits. The PostgreSQL repositories
//! implement them; tests plug in in-memory stores.

pub mod item_repo;
pub mod list_repo;
pub mod ownership_repo;
pub mod user_repo;

pub use item_repo::ItemRepository;
pub use list_repo::ListRepository;
pub use ownership_repo::OwnershipRepository;
pub use user_repo::UserRepository;

use crate::{
    error::StorageError,
    models::{
        todo::{
            CreateItemRequest, CreateListRequest, ResourceKind, TodoItem, TodoList,
            UpdateItemRequest, UpdateListRequest,
        },
        user::{User, UserId},
    },
};
use async_trait::async_trait;
use std::{future::Future, time::Duration};

/// User storage
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user. A taken username is `StorageError::DuplicateUsername`,
    /// enforced atomically by the store.
    async fn create_user(
        &self,
        name: &str,
        username: &str,
        password_hash: &str,
    ) -> Result<UserId, StorageError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StorageError>;
}

/// Ownership associations between users and lists/items
#[async_trait]
pub trait OwnershipStore: Send + Sync {
    async fn is_owner(
        &self,
        user_id: UserId,
        kind: ResourceKind,
        resource_id: i64,
    ) -> Result<bool, StorageError>;
}

/// List storage. `create` records the owner association in the same
/// transaction as the list row.
#[async_trait]
pub trait ListStore: Send + Sync {
    async fn create(&self, owner: UserId, req: &CreateListRequest) -> Result<i64, StorageError>;

    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<TodoList>, StorageError>;

    async fn get(&self, owner: UserId, list_id: i64) -> Result<Option<TodoList>, StorageError>;

    async fn update(
        &self,
        owner: UserId,
        list_id: i64,
        req: &UpdateListRequest,
    ) -> Result<bool, StorageError>;

    /// Deletes the list and every item in it
    async fn delete(&self, owner: UserId, list_id: i64) -> Result<bool, StorageError>;
}

/// Item storage. `create` links the item to its list in the same
/// transaction as the item row; the item is owned by the list's owner.
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn create(&self, list_id: i64, req: &CreateItemRequest) -> Result<i64, StorageError>;

    async fn list_in(&self, list_id: i64) -> Result<Vec<TodoItem>, StorageError>;

    async fn get(&self, owner: UserId, item_id: i64) -> Result<Option<TodoItem>, StorageError>;

    async fn update(
        &self,
        owner: UserId,
        item_id: i64,
        req: &UpdateItemRequest,
    ) -> Result<bool, StorageError>;

    async fn delete(&self, owner: UserId, item_id: i64) -> Result<bool, StorageError>;
}

/// Run a storage call under a deadline. Elapsing drops the call and
/// surfaces `StorageError::Timeout`.
pub async fn bounded<T, F>(limit: Duration, call: F) -> Result<T, StorageError>
where
    F: Future<Output = Result<T, StorageError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(timeout_ms = limit.as_millis() as u64, "Storage call timed out");
            Err(StorageError::Timeout)
        }
    }
}
