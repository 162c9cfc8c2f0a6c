//! Business logic services.

pub mod product_service;

pub use product_service::{CHILD_RESOURCES, IncludedItems, ProductService};
