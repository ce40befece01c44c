//! Service layer providing validated CRUD operations for users and posts.
//! - Validation runs before any persistence call and reports every bad field.
//! - Persistence sits behind repository traits (SeaORM or in-memory).
//! - All failures surface as [`errors::ServiceError`].

pub mod errors;
pub mod pagination;
pub mod post;
pub mod storage;
pub mod user;
pub mod validation;
#[cfg(test)]
pub mod test_support;

pub use errors::{ServiceError, StoreError};
pub use post::PostService;
pub use user::UserService;
