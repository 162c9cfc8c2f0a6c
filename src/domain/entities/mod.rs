//! Core domain entities representing the product data model.
//!
//! Entities are plain data structures. Their serialized attribute names are
//! the same dotted keys used in search criteria (`product.code`,
//! `product.lists.domain`, ...).
//!
//! # Entity Types
//!
//! - [`Product`] - A product record
//! - [`ProductProperty`] - A child record referencing a product via `parentid`
//! - [`ProductListItem`] - An association between a product and another domain
//! - [`ResourceItem`] - Any of the above, as returned by managers

pub mod list_item;
pub mod product;
pub mod property;
pub mod resource_item;

pub use list_item::ProductListItem;
pub use product::Product;
pub use property::ProductProperty;
pub use resource_item::{PRODUCT, PRODUCT_LISTS, PRODUCT_PROPERTY, ResourceItem, resource_keys};
