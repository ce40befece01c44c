use chrono::Utc;
use configs::DatabaseConfig;
use sea_orm::{ActiveModelTrait, DbBackend, EntityTrait, ModelTrait, QueryTrait, Set};

use crate::{db, post, user};

fn sample_user(id: i32) -> user::Model {
    let now = Utc::now().into();
    user::Model { id, email: format!("u{id}@example.com"), name: "U".into(), created_at: now, updated_at: now }
}

#[test]
fn posts_of_user_join_on_author_id() {
    let sql = sample_user(7)
        .find_related(post::Entity)
        .build(DbBackend::Postgres)
        .to_string();
    assert!(sql.contains(r#"FROM "post""#), "{sql}");
    assert!(sql.contains(r#""post"."author_id""#), "{sql}");
}

#[test]
fn connect_options_carry_pool_settings() {
    let cfg = DatabaseConfig { url: "postgres://blog@localhost/blog".into(), max_connections: 7, ..DatabaseConfig::default() };
    let opt = db::connect_options(&cfg);
    assert_eq!(opt.get_url(), "postgres://blog@localhost/blog");
    assert_eq!(opt.get_max_connections(), Some(7));
}

/// Deleting a user removes their posts through the FK cascade.
#[tokio::test]
async fn user_delete_cascades_to_posts() -> anyhow::Result<()> {
    use migration::MigratorTrait;

    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return Ok(());
    }
    let db = db::connect().await?;
    migration::Migrator::up(&db, None).await?;

    let now = Utc::now();
    let author = user::ActiveModel {
        email: Set(format!("cascade_{}@example.com", now.timestamp_nanos_opt().unwrap_or_default())),
        name: Set("Cascade".into()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    let p = post::ActiveModel {
        title: Set("hello".into()),
        content: Set(None),
        published: Set(false),
        author_id: Set(author.id),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    user::Entity::delete_by_id(author.id).exec(&db).await?;
    assert!(post::Entity::find_by_id(p.id).one(&db).await?.is_none());
    Ok(())
}
