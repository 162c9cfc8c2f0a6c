//! Manager implementations.
//!
//! PostgreSQL managers build their queries at runtime with
//! `sqlx::QueryBuilder`, binding every value as a parameter.
//!
//! # Managers
//!
//! - [`PgManager`] - One resource table described by a [`ResourceSchema`]
//! - [`PgManagerFactory`] - Serves `product`, `product/property` and `product/lists`
//! - [`MemoryManagerFactory`] - In-memory records for fixtures and tests

pub mod memory_manager;
pub mod pg_manager;
pub mod pg_manager_factory;
pub mod schema;
pub mod sql;

pub use memory_manager::{MemoryManager, MemoryManagerFactory};
pub use pg_manager::PgManager;
pub use pg_manager_factory::PgManagerFactory;
pub use schema::ResourceSchema;
