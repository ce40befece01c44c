use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument};

use super::domain::User;
use super::repository::UserRepository;
use crate::errors::{ServiceError, StoreError};
use crate::pagination::Pagination;
use crate::validation;

/// User operations over an injected repository.
///
/// Each operation validates first and then makes exactly one repository call.
pub struct UserService<R: UserRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: UserRepository + ?Sized> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Validate and insert a new user.
    ///
    /// # Examples
    /// ```
    /// use service::{storage::MemoryStore, UserService};
    /// use std::sync::Arc;
    /// let svc = UserService::new(Arc::new(MemoryStore::new()));
    /// let user = tokio_test::block_on(svc.create(&serde_json::json!({"email": "a@x.com", "name": "A"}))).unwrap();
    /// assert_eq!(user.email, "a@x.com");
    /// assert!(user.id > 0);
    /// ```
    #[instrument(skip(self, payload))]
    pub async fn create(&self, payload: &Value) -> Result<User, ServiceError> {
        let new = validation::validate_create_user(payload).inspect_err(|e| debug!(fields = ?e.fields(), "user_create_rejected"))?;
        let email = new.email.clone();
        let user = self.repo.insert(new).await.map_err(|e| email_conflict(e, &email))?;
        info!(user_id = user.id, "user_created");
        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn list_page(&self, page: Pagination) -> Result<Vec<User>, ServiceError> {
        let (idx, per_page) = page.normalize();
        Ok(self.repo.find_page(idx, per_page).await?)
    }

    pub async fn get(&self, id: i32) -> Result<User, ServiceError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("user", id))
    }

    /// Merge the present fields of `payload` into user `id`.
    #[instrument(skip(self, payload))]
    pub async fn update(&self, id: i32, payload: &Value) -> Result<User, ServiceError> {
        let changes = validation::validate_update_user(payload).inspect_err(|e| debug!(fields = ?e.fields(), "user_update_rejected"))?;
        let email = changes.email.clone().unwrap_or_default();
        let user = self
            .repo
            .update(id, changes)
            .await
            .map_err(|e| email_conflict(e, &email))?
            .ok_or_else(|| ServiceError::not_found("user", id))?;
        info!(user_id = user.id, "user_updated");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("user", id));
        }
        info!(user_id = id, "user_deleted");
        Ok(())
    }
}

fn email_conflict(e: StoreError, email: &str) -> ServiceError {
    match e {
        StoreError::UniqueViolation(_) => ServiceError::Conflict(format!("email {email} is already registered")),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde_json::json;

    fn service() -> UserService<MemoryStore> { UserService::new(Arc::new(MemoryStore::new())) }

    #[tokio::test]
    async fn create_then_get_returns_same_record() -> Result<(), ServiceError> {
        let svc = service();
        let created = svc.create(&json!({"email": "a@x.com", "name": "A"})).await?;
        assert_eq!(created.email, "a@x.com");
        assert_eq!(created.name, "A");
        assert_eq!(svc.get(created.id).await?, created);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_create_persists_nothing() -> Result<(), ServiceError> {
        let svc = service();
        let err = svc.create(&json!({"email": ""})).await.unwrap_err();
        match err {
            ServiceError::Validation(e) => assert_eq!(e.fields(), ["email", "name"]),
            other => panic!("unexpected {other:?}"),
        }
        assert!(svc.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() -> Result<(), ServiceError> {
        let svc = service();
        svc.create(&json!({"email": "a@x.com", "name": "A"})).await?;
        let err = svc.create(&json!({"email": "a@x.com", "name": "Other"})).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(ref m) if m.contains("a@x.com")));
        assert_eq!(svc.list().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn update_to_taken_email_conflicts() -> Result<(), ServiceError> {
        let svc = service();
        svc.create(&json!({"email": "a@x.com", "name": "A"})).await?;
        let b = svc.create(&json!({"email": "b@x.com", "name": "B"})).await?;
        let err = svc.update(b.id, &json!({"email": "a@x.com"})).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(ref m) if m.contains("a@x.com")));
        assert_eq!(svc.get(b.id).await?.email, "b@x.com");
        Ok(())
    }

    #[tokio::test]
    async fn update_merges_only_present_fields() -> Result<(), ServiceError> {
        let svc = service();
        let u = svc.create(&json!({"email": "a@x.com", "name": "A"})).await?;
        let updated = svc.update(u.id, &json!({"name": "B"})).await?;
        assert_eq!(updated.name, "B");
        let fetched = svc.get(u.id).await?;
        assert_eq!(fetched.name, "B");
        assert_eq!(fetched.email, "a@x.com");
        Ok(())
    }

    #[tokio::test]
    async fn update_validates_before_lookup() {
        let svc = service();
        let err = svc.update(42, &json!({"name": ""})).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_id_is_not_found_everywhere() {
        let svc = service();
        assert!(matches!(svc.get(7).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.update(7, &json!({"name": "B"})).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(7).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_removes_from_get_and_list() -> Result<(), ServiceError> {
        let svc = service();
        let a = svc.create(&json!({"email": "a@x.com", "name": "A"})).await?;
        let b = svc.create(&json!({"email": "b@x.com", "name": "B"})).await?;
        svc.delete(a.id).await?;
        assert!(matches!(svc.get(a.id).await, Err(ServiceError::NotFound(_))));
        assert_eq!(svc.list().await?, vec![b]);
        Ok(())
    }

    #[tokio::test]
    async fn list_page_normalizes_bounds() -> Result<(), ServiceError> {
        let svc = service();
        for i in 0..3 {
            svc.create(&json!({"email": format!("u{i}@x.com"), "name": "U"})).await?;
        }
        let first = svc.list_page(Pagination { page: 0, per_page: 2 }).await?;
        assert_eq!(first.len(), 2);
        let second = svc.list_page(Pagination { page: 2, per_page: 2 }).await?;
        assert_eq!(second.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn works_behind_trait_object() -> Result<(), ServiceError> {
        let repo: Arc<dyn UserRepository> = Arc::new(MemoryStore::new());
        let svc = UserService::new(repo);
        let u = svc.create(&json!({"email": "dyn@x.com", "name": "Dyn"})).await?;
        assert_eq!(svc.get(u.id).await?.name, "Dyn");
        Ok(())
    }
}
