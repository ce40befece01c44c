//! SeaORM entities for the blog schema and connection helpers.
//!
//! Tables are created by the `migration` crate; entity fields mirror those columns.

pub mod db;
pub mod post;
pub mod user;

#[cfg(test)]
mod tests;
