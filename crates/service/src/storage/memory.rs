use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::errors::StoreError;
use crate::post::domain::{NewPost, Post, PostChanges};
use crate::post::repository::PostRepository;
use crate::user::domain::{NewUser, User, UserChanges};
use crate::user::repository::UserRepository;

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    posts: BTreeMap<i32, Post>,
    last_user_id: i32,
    last_post_id: i32,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<i32>) -> bool {
        self.users.values().any(|u| u.email == email && Some(u.id) != except)
    }

    fn check_author(&self, author_id: i32) -> Result<(), StoreError> {
        if self.users.contains_key(&author_id) {
            Ok(())
        } else {
            Err(StoreError::ForeignKeyViolation(format!("fk_post_author: user {author_id} does not exist")))
        }
    }
}

/// In-process store holding both tables behind one lock.
///
/// Ids auto-increment from 1 and are never reused; `BTreeMap` ordering keeps
/// listings in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }
}

fn page<T: Clone>(rows: impl Iterator<Item = T>, page_idx: u64, per_page: u64) -> Vec<T> {
    let skip = usize::try_from(page_idx.saturating_mul(per_page)).unwrap_or(usize::MAX);
    let take = usize::try_from(per_page).unwrap_or(usize::MAX);
    rows.skip(skip).take(take).collect()
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, new: NewUser) -> Result<User, StoreError> {
        let mut t = self.inner.write().await;
        if t.email_taken(&new.email, None) {
            return Err(StoreError::UniqueViolation(format!("user_email_key: {}", new.email)));
        }
        t.last_user_id += 1;
        let now = Utc::now();
        let user = User { id: t.last_user_id, email: new.email, name: new.name, created_at: now, updated_at: now };
        t.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.inner.read().await.users.values().cloned().collect())
    }

    async fn find_page(&self, page_idx: u64, per_page: u64) -> Result<Vec<User>, StoreError> {
        Ok(page(self.inner.read().await.users.values().cloned(), page_idx, per_page))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn update(&self, id: i32, changes: UserChanges) -> Result<Option<User>, StoreError> {
        let mut t = self.inner.write().await;
        if !t.users.contains_key(&id) {
            return Ok(None);
        }
        if let Some(email) = changes.email.as_deref() {
            if t.email_taken(email, Some(id)) {
                return Err(StoreError::UniqueViolation(format!("user_email_key: {email}")));
            }
        }
        let Some(user) = t.users.get_mut(&id) else { return Ok(None) };
        if !changes.is_empty() {
            changes.apply_to(user);
            user.updated_at = Utc::now();
        }
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let mut t = self.inner.write().await;
        let existed = t.users.remove(&id).is_some();
        if existed {
            // ON DELETE CASCADE
            t.posts.retain(|_, p| p.author_id != id);
        }
        Ok(existed)
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn insert(&self, new: NewPost) -> Result<Post, StoreError> {
        let mut t = self.inner.write().await;
        t.check_author(new.author_id)?;
        t.last_post_id += 1;
        let now = Utc::now();
        let post = Post {
            id: t.last_post_id,
            title: new.title,
            content: new.content,
            published: new.published,
            author_id: new.author_id,
            created_at: now,
            updated_at: now,
        };
        t.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_all(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self.inner.read().await.posts.values().cloned().collect())
    }

    async fn find_page(&self, page_idx: u64, per_page: u64) -> Result<Vec<Post>, StoreError> {
        Ok(page(self.inner.read().await.posts.values().cloned(), page_idx, per_page))
    }

    async fn find_by_author(&self, author_id: i32) -> Result<Vec<Post>, StoreError> {
        let t = self.inner.read().await;
        Ok(t.posts.values().filter(|p| p.author_id == author_id).cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, StoreError> {
        Ok(self.inner.read().await.posts.get(&id).cloned())
    }

    async fn update(&self, id: i32, changes: PostChanges) -> Result<Option<Post>, StoreError> {
        let mut t = self.inner.write().await;
        if !t.posts.contains_key(&id) {
            return Ok(None);
        }
        if let Some(author_id) = changes.author_id {
            t.check_author(author_id)?;
        }
        let Some(post) = t.posts.get_mut(&id) else { return Ok(None) };
        if !changes.is_empty() {
            changes.apply_to(post);
            post.updated_at = Utc::now();
        }
        Ok(Some(post.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.posts.remove(&id).is_some())
    }
}
