use async_trait::async_trait;

use super::domain::{NewUser, User, UserChanges};
use crate::errors::StoreError;

/// Persistence abstraction for the `user` table.
///
/// Implementations assign identifiers and timestamps, and must surface a
/// duplicate email as [`StoreError::UniqueViolation`].
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, new: NewUser) -> Result<User, StoreError>;
    /// All users in insertion order.
    async fn find_all(&self) -> Result<Vec<User>, StoreError>;
    /// `page_idx` is 0-based.
    async fn find_page(&self, page_idx: u64, per_page: u64) -> Result<Vec<User>, StoreError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, StoreError>;
    /// `Ok(None)` when no user has this id.
    async fn update(&self, id: i32, changes: UserChanges) -> Result<Option<User>, StoreError>;
    /// Returns whether a row was removed.
    async fn delete(&self, id: i32) -> Result<bool, StoreError>;
}
