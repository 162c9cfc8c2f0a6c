//! Infrastructure layer for external integrations.
//!
//! This layer implements the manager traits defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL and in-memory manager implementations

pub mod persistence;
