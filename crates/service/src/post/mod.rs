//! Post resource: domain types, repository seam and service.

pub mod domain;
pub mod repo;
pub mod repository;
pub mod service;

pub use domain::{NewPost, Post, PostChanges};
pub use repository::PostRepository;
pub use service::PostService;
