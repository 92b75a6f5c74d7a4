//! Business logic services layer

pub mod auth_service;
pub mod item_service;
pub mod list_service;
pub mod ownership_guard;

pub use auth_service::AuthService;
pub use item_service::ItemService;
pub use list_service::ListService;
pub use ownership_guard::OwnershipGuard;
