use async_trait::async_trait;

use super::domain::{NewPost, Post, PostChanges};
use crate::errors::StoreError;

/// Persistence abstraction for the `post` table.
///
/// An `author_id` that references no user must surface as
/// [`StoreError::ForeignKeyViolation`].
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn insert(&self, new: NewPost) -> Result<Post, StoreError>;
    async fn find_all(&self) -> Result<Vec<Post>, StoreError>;
    async fn find_page(&self, page_idx: u64, per_page: u64) -> Result<Vec<Post>, StoreError>;
    async fn find_by_author(&self, author_id: i32) -> Result<Vec<Post>, StoreError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, StoreError>;
    async fn update(&self, id: i32, changes: PostChanges) -> Result<Option<Post>, StoreError>;
    async fn delete(&self, id: i32) -> Result<bool, StoreError>;
}
