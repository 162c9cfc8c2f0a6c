//! Domain layer containing entities, search criteria and the manager seam.
//!
//! # Architecture
//!
//! - [`entities`] - Product, property and list records
//! - [`criteria`] - Search conditions, sorting and slicing
//! - [`manager`] - Data access trait definitions
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Manager traits define contracts implemented by the infrastructure layer
//! - Business logic lives in services (see [`crate::application::services`])

pub mod criteria;
pub mod entities;
pub mod manager;
