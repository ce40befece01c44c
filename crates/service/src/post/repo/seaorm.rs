use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};

use models::post;

use crate::errors::StoreError;
use crate::post::domain::{NewPost, Post, PostChanges};
use crate::post::repository::PostRepository;

pub struct SeaOrmPostRepository {
    pub db: Arc<DatabaseConnection>,
}

impl SeaOrmPostRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self { Self { db } }
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn insert(&self, new: NewPost) -> Result<Post, StoreError> {
        let now = Utc::now().into();
        let am = post::ActiveModel {
            title: Set(new.title),
            content: Set(new.content),
            published: Set(new.published),
            author_id: Set(new.author_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        Ok(am.insert(&*self.db).await?.into())
    }

    async fn find_all(&self) -> Result<Vec<Post>, StoreError> {
        let rows = post::Entity::find().order_by_asc(post::Column::Id).all(&*self.db).await?;
        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn find_page(&self, page_idx: u64, per_page: u64) -> Result<Vec<Post>, StoreError> {
        let rows = post::Entity::find()
            .order_by_asc(post::Column::Id)
            .paginate(&*self.db, per_page)
            .fetch_page(page_idx)
            .await?;
        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn find_by_author(&self, author_id: i32) -> Result<Vec<Post>, StoreError> {
        let rows = post::Entity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .order_by_asc(post::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, StoreError> {
        Ok(post::Entity::find_by_id(id).one(&*self.db).await?.map(Post::from))
    }

    async fn update(&self, id: i32, changes: PostChanges) -> Result<Option<Post>, StoreError> {
        let Some(existing) = post::Entity::find_by_id(id).one(&*self.db).await? else { return Ok(None) };
        if changes.is_empty() {
            return Ok(Some(existing.into()));
        }
        let mut am: post::ActiveModel = existing.into();
        if let Some(title) = changes.title { am.title = Set(title); }
        if let Some(content) = changes.content { am.content = Set(content); }
        if let Some(published) = changes.published { am.published = Set(published); }
        if let Some(author_id) = changes.author_id { am.author_id = Set(author_id); }
        am.updated_at = Set(Utc::now().into());
        match am.update(&*self.db).await {
            Ok(model) => Ok(Some(model.into())),
            // deleted between the read and the write
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let res = post::Entity::delete_by_id(id).exec(&*self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
