use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument};

use super::domain::Post;
use super::repository::PostRepository;
use crate::errors::{ServiceError, StoreError};
use crate::pagination::Pagination;
use crate::user::repository::UserRepository;
use crate::validation;

/// Post operations. The user repository is only consulted by
/// [`PostService::list_by_author`] to tell an unknown author from an author without posts.
pub struct PostService<P: PostRepository + ?Sized, U: UserRepository + ?Sized> {
    posts: Arc<P>,
    users: Arc<U>,
}

impl<P: PostRepository + ?Sized, U: UserRepository + ?Sized> PostService<P, U> {
    pub fn new(posts: Arc<P>, users: Arc<U>) -> Self { Self { posts, users } }

    /// Validate and insert a new post for an existing author.
    ///
    /// # Examples
    /// ```
    /// use service::{storage::MemoryStore, PostService, UserService};
    /// use serde_json::json;
    /// use std::sync::Arc;
    /// let store = Arc::new(MemoryStore::new());
    /// let users = UserService::new(store.clone());
    /// let posts = PostService::new(store.clone(), store);
    /// let author = tokio_test::block_on(users.create(&json!({"email": "a@x.com", "name": "A"}))).unwrap();
    /// let post = tokio_test::block_on(posts.create(&json!({"title": "Hello", "author_id": author.id}))).unwrap();
    /// assert!(!post.published);
    /// ```
    #[instrument(skip(self, payload))]
    pub async fn create(&self, payload: &Value) -> Result<Post, ServiceError> {
        let new = validation::validate_create_post(payload).inspect_err(|e| debug!(fields = ?e.fields(), "post_create_rejected"))?;
        let author_id = new.author_id;
        let post = self.posts.insert(new).await.map_err(|e| author_conflict(e, author_id))?;
        info!(post_id = post.id, author_id, "post_created");
        Ok(post)
    }

    pub async fn list(&self) -> Result<Vec<Post>, ServiceError> {
        Ok(self.posts.find_all().await?)
    }

    pub async fn list_page(&self, page: Pagination) -> Result<Vec<Post>, ServiceError> {
        let (idx, per_page) = page.normalize();
        Ok(self.posts.find_page(idx, per_page).await?)
    }

    /// Posts written by `user_id`; `NotFound` when the user does not exist.
    pub async fn list_by_author(&self, user_id: i32) -> Result<Vec<Post>, ServiceError> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(ServiceError::not_found("user", user_id));
        }
        Ok(self.posts.find_by_author(user_id).await?)
    }

    pub async fn get(&self, id: i32) -> Result<Post, ServiceError> {
        self.posts.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("post", id))
    }

    #[instrument(skip(self, payload))]
    pub async fn update(&self, id: i32, payload: &Value) -> Result<Post, ServiceError> {
        let changes = validation::validate_update_post(payload).inspect_err(|e| debug!(fields = ?e.fields(), "post_update_rejected"))?;
        let author_id = changes.author_id.unwrap_or_default();
        let post = self
            .posts
            .update(id, changes)
            .await
            .map_err(|e| author_conflict(e, author_id))?
            .ok_or_else(|| ServiceError::not_found("post", id))?;
        info!(post_id = post.id, "post_updated");
        Ok(post)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.posts.delete(id).await? {
            return Err(ServiceError::not_found("post", id));
        }
        info!(post_id = id, "post_deleted");
        Ok(())
    }
}

fn author_conflict(e: StoreError, author_id: i32) -> ServiceError {
    match e {
        StoreError::ForeignKeyViolation(_) => ServiceError::Conflict(format!("author {author_id} does not exist")),
        other => other.into(),
    }
}
