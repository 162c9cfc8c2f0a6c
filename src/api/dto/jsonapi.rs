//! JSON:API document types for product responses.
//!
//! A product document holds the products in `data` and their related
//! records in `included`. Each product links its related records under
//! `relationships`:
//!
//! - child records are grouped by resource type (`product/property`)
//! - list records are grouped by domain (`text`, `media`, ...), each entry
//!   pointing at the included `product/lists` record, with the referenced
//!   domain and id in `meta`
//!
//! ```json
//! {
//!   "meta": { "total": 1 },
//!   "data": [{
//!     "id": "1", "type": "product",
//!     "attributes": { "product.code": "shirt", ... },
//!     "relationships": {
//!       "product/property": { "data": [{ "id": "3", "type": "product/property" }] },
//!       "text": { "data": [{ "id": "7", "type": "product/lists", "meta": { "domain": "text", "refid": "42" } }] }
//!     }
//!   }],
//!   "included": [ ... ]
//! }
//! ```

use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;

use crate::application::services::IncludedItems;
use crate::domain::entities::ResourceItem;
use crate::domain::manager::ItemMap;
use crate::error::AppError;

/// Top-level JSON:API document.
#[derive(Debug, Serialize)]
pub struct Document {
    pub meta: DocumentMeta,
    pub data: PrimaryData,
    pub included: Vec<ResourceObject>,
}

#[derive(Debug, Serialize)]
pub struct DocumentMeta {
    pub total: u64,
}

/// Primary data: one resource or a collection.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PrimaryData {
    One(Box<ResourceObject>),
    Many(Vec<ResourceObject>),
}

#[derive(Debug, Serialize)]
pub struct ResourceObject {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: Value,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: BTreeMap<String, Relationship>,
}

#[derive(Debug, Default, Serialize)]
pub struct Relationship {
    pub data: Vec<ResourceIdentifier>,
}

#[derive(Debug, Serialize)]
pub struct ResourceIdentifier {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl Document {
    /// Builds a collection document.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if an item cannot be serialized.
    pub fn collection(
        items: &ItemMap,
        included: &IncludedItems,
        total: u64,
    ) -> Result<Self, AppError> {
        let data = items
            .values()
            .map(|item| product_object(item, included))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            meta: DocumentMeta { total },
            data: PrimaryData::Many(data),
            included: included_objects(included)?,
        })
    }

    /// Builds a single-resource document.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if an item cannot be serialized.
    pub fn single(item: &ResourceItem, included: &IncludedItems) -> Result<Self, AppError> {
        Ok(Self {
            meta: DocumentMeta { total: 1 },
            data: PrimaryData::One(Box::new(product_object(item, included)?)),
            included: included_objects(included)?,
        })
    }
}

fn resource_object(item: &ResourceItem) -> Result<ResourceObject, AppError> {
    let attributes = item.attributes().map_err(|e| {
        AppError::internal(
            "Failed to serialize item",
            json!({"type": item.resource_type(), "id": item.id(), "error": e.to_string()}),
        )
    })?;

    Ok(ResourceObject {
        id: item.id().to_string(),
        kind: item.resource_type().to_string(),
        attributes,
        relationships: BTreeMap::new(),
    })
}

fn product_object(item: &ResourceItem, included: &IncludedItems) -> Result<ResourceObject, AppError> {
    let mut object = resource_object(item)?;
    let id = item.id();

    for child in included.children.iter().filter(|c| c.parent_id() == Some(id)) {
        object
            .relationships
            .entry(child.resource_type().to_string())
            .or_default()
            .data
            .push(ResourceIdentifier {
                id: child.id().to_string(),
                kind: child.resource_type().to_string(),
                meta: None,
            });
    }

    for list in included.lists.values() {
        let ResourceItem::ListItem(list_item) = list else {
            continue;
        };
        if list_item.parent_id != id {
            continue;
        }

        object
            .relationships
            .entry(list_item.domain.clone())
            .or_default()
            .data
            .push(ResourceIdentifier {
                id: list_item.id.to_string(),
                kind: list.resource_type().to_string(),
                meta: Some(json!({"domain": list_item.domain, "refid": list_item.ref_id})),
            });
    }

    Ok(object)
}

fn included_objects(included: &IncludedItems) -> Result<Vec<ResourceObject>, AppError> {
    included
        .children
        .iter()
        .chain(included.lists.values())
        .map(resource_object)
        .collect()
}
