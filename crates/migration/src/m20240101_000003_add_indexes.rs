use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Post: index on author_id for per-user listings
        manager
            .create_index(
                Index::create()
                    .name("idx_post_author")
                    .table(Post::Table)
                    .col(Post::AuthorId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_post_author").table(Post::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Post { Table, AuthorId }
