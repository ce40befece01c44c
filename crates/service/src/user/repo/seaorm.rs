use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder, Set};

use models::user;

use crate::errors::StoreError;
use crate::user::domain::{NewUser, User, UserChanges};
use crate::user::repository::UserRepository;

/// SeaORM-backed repository implementation.
pub struct SeaOrmUserRepository {
    pub db: Arc<DatabaseConnection>,
}

impl SeaOrmUserRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self { Self { db } }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn insert(&self, new: NewUser) -> Result<User, StoreError> {
        let now = Utc::now().into();
        let am = user::ActiveModel {
            email: Set(new.email),
            name: Set(new.name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        Ok(am.insert(&*self.db).await?.into())
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        let rows = user::Entity::find().order_by_asc(user::Column::Id).all(&*self.db).await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_page(&self, page_idx: u64, per_page: u64) -> Result<Vec<User>, StoreError> {
        let rows = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .paginate(&*self.db, per_page)
            .fetch_page(page_idx)
            .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, StoreError> {
        let found = user::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(found.map(User::from))
    }

    async fn update(&self, id: i32, changes: UserChanges) -> Result<Option<User>, StoreError> {
        let Some(existing) = user::Entity::find_by_id(id).one(&*self.db).await? else { return Ok(None) };
        if changes.is_empty() {
            return Ok(Some(existing.into()));
        }
        let mut am: user::ActiveModel = existing.into();
        if let Some(email) = changes.email { am.email = Set(email); }
        if let Some(name) = changes.name { am.name = Set(name); }
        am.updated_at = Set(Utc::now().into());
        match am.update(&*self.db).await {
            Ok(model) => Ok(Some(model.into())),
            // deleted between the read and the write
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let res = user::Entity::delete_by_id(id).exec(&*self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
