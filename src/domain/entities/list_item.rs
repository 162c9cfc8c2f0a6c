//! Product list (association) entity.

use serde::Serialize;

use crate::domain::criteria::Value;

/// Links a product to a record of another domain (`text`, `media`, `price`, ...).
///
/// `ref_id` is the identifier of the referenced record inside `domain`; it is
/// kept as a string because referenced domains do not share an id type.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct ProductListItem {
    #[serde(rename = "product.lists.id")]
    pub id: i64,
    #[serde(rename = "product.lists.parentid")]
    #[sqlx(rename = "parentid")]
    pub parent_id: i64,
    #[serde(rename = "product.lists.domain")]
    pub domain: String,
    #[serde(rename = "product.lists.type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    #[serde(rename = "product.lists.refid")]
    #[sqlx(rename = "refid")]
    pub ref_id: String,
    #[serde(rename = "product.lists.position")]
    pub position: i32,
    #[serde(rename = "product.lists.status")]
    pub status: i32,
}

impl ProductListItem {
    /// Search keys understood by [`ProductListItem::attribute`].
    pub const KEYS: &'static [&'static str] = &[
        "product.lists.id",
        "product.lists.parentid",
        "product.lists.domain",
        "product.lists.type",
        "product.lists.refid",
        "product.lists.position",
        "product.lists.status",
    ];

    /// Returns the value of a `product.lists.*` search key.
    pub fn attribute(&self, key: &str) -> Option<Value> {
        match key {
            "product.lists.id" => Some(self.id.into()),
            "product.lists.parentid" => Some(self.parent_id.into()),
            "product.lists.domain" => Some(self.domain.as_str().into()),
            "product.lists.type" => Some(self.kind.as_str().into()),
            "product.lists.refid" => Some(self.ref_id.as_str().into()),
            "product.lists.position" => Some(self.position.into()),
            "product.lists.status" => Some(self.status.into()),
            _ => None,
        }
    }
}
