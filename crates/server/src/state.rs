use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::post::{repo::SeaOrmPostRepository, PostRepository};
use service::storage::MemoryStore;
use service::user::{repo::SeaOrmUserRepository, UserRepository};
use service::{PostService, UserService};

pub type DynUserService = UserService<dyn UserRepository>;
pub type DynPostService = PostService<dyn PostRepository, dyn UserRepository>;

/// Shared handler state: the services, each holding its repository handle.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<DynUserService>,
    pub posts: Arc<DynPostService>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self {
            users: Arc::new(UserService::new(Arc::clone(&users))),
            posts: Arc::new(PostService::new(posts, users)),
        }
    }

    /// Both repositories share one pool handle.
    pub fn seaorm(db: DatabaseConnection) -> Self {
        let db = Arc::new(db);
        Self::new(
            Arc::new(SeaOrmUserRepository::new(Arc::clone(&db))),
            Arc::new(SeaOrmPostRepository::new(db)),
        )
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(store.clone(), store)
    }
}
