//! User resource: domain types, repository seam and service.

pub mod domain;
pub mod repo;
pub mod repository;
pub mod service;

pub use domain::{NewUser, User, UserChanges};
pub use repository::UserRepository;
pub use service::UserService;
