//! Application layer services implementing business logic.
//!
//! Services consume the manager traits from [`crate::domain::manager`] and
//! provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::product_service::ProductService`] - Product lookup and relationship expansion

pub mod services;
