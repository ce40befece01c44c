//! Storage backends that do not need a database server.
//!
//! `MemoryStore` implements both repository traits with the same constraint
//! semantics as the PostgreSQL schema, for local runs and tests.

pub mod memory;

pub use memory::MemoryStore;
