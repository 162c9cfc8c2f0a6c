//! Type-erased record returned by managers.

use serde_json::Value as JsonValue;

use super::{Product, ProductListItem, ProductProperty};
use crate::domain::criteria::Value;

/// Resource type of products.
pub const PRODUCT: &str = "product";
/// Resource type of product properties.
pub const PRODUCT_PROPERTY: &str = "product/property";
/// Resource type of product list items.
pub const PRODUCT_LISTS: &str = "product/lists";

/// Returns the search keys of a resource type, empty for unknown types.
pub fn resource_keys(resource: &str) -> &'static [&'static str] {
    match resource {
        PRODUCT => Product::KEYS,
        PRODUCT_PROPERTY => ProductProperty::KEYS,
        PRODUCT_LISTS => ProductListItem::KEYS,
        _ => &[],
    }
}

/// Any record a manager can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceItem {
    Product(Product),
    Property(ProductProperty),
    ListItem(ProductListItem),
}

impl ResourceItem {
    pub fn id(&self) -> i64 {
        match self {
            ResourceItem::Product(p) => p.id,
            ResourceItem::Property(p) => p.id,
            ResourceItem::ListItem(l) => l.id,
        }
    }

    pub fn resource_type(&self) -> &'static str {
        match self {
            ResourceItem::Product(_) => PRODUCT,
            ResourceItem::Property(_) => PRODUCT_PROPERTY,
            ResourceItem::ListItem(_) => PRODUCT_LISTS,
        }
    }

    /// Returns the referenced product id for child and list records.
    pub fn parent_id(&self) -> Option<i64> {
        match self {
            ResourceItem::Product(_) => None,
            ResourceItem::Property(p) => Some(p.parent_id),
            ResourceItem::ListItem(l) => Some(l.parent_id),
        }
    }

    pub fn attribute(&self, key: &str) -> Option<Value> {
        match self {
            ResourceItem::Product(p) => p.attribute(key),
            ResourceItem::Property(p) => p.attribute(key),
            ResourceItem::ListItem(l) => l.attribute(key),
        }
    }

    /// Serializes the record's attributes as a JSON object.
    pub fn attributes(&self) -> serde_json::Result<JsonValue> {
        match self {
            ResourceItem::Product(p) => serde_json::to_value(p),
            ResourceItem::Property(p) => serde_json::to_value(p),
            ResourceItem::ListItem(l) => serde_json::to_value(l),
        }
    }
}

impl From<Product> for ResourceItem {
    fn from(p: Product) -> Self {
        ResourceItem::Product(p)
    }
}

impl From<ProductProperty> for ResourceItem {
    fn from(p: ProductProperty) -> Self {
        ResourceItem::Property(p)
    }
}

impl From<ProductListItem> for ResourceItem {
    fn from(l: ProductListItem) -> Self {
        ResourceItem::ListItem(l)
    }
}
