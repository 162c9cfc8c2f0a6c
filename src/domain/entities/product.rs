//! Product entity.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::criteria::Value;

/// A product record as exposed by the admin API.
///
/// Attribute names follow the `product.<field>` search keys so the same
/// names are used for filtering, sorting and serialization.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Product {
    #[serde(rename = "product.id")]
    pub id: i64,
    #[serde(rename = "product.code")]
    pub code: String,
    #[serde(rename = "product.label")]
    pub label: String,
    #[serde(rename = "product.type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    #[serde(rename = "product.status")]
    pub status: i32,
    #[serde(rename = "product.ctime")]
    pub ctime: DateTime<Utc>,
    #[serde(rename = "product.mtime")]
    pub mtime: DateTime<Utc>,
}

impl Product {
    /// Search keys understood by [`Product::attribute`].
    pub const KEYS: &'static [&'static str] = &[
        "product.id",
        "product.code",
        "product.label",
        "product.type",
        "product.status",
        "product.ctime",
        "product.mtime",
    ];

    /// Returns the value of a `product.*` search key.
    pub fn attribute(&self, key: &str) -> Option<Value> {
        match key {
            "product.id" => Some(self.id.into()),
            "product.code" => Some(self.code.as_str().into()),
            "product.label" => Some(self.label.as_str().into()),
            "product.type" => Some(self.kind.as_str().into()),
            "product.status" => Some(self.status.into()),
            "product.ctime" => Some(self.ctime.to_rfc3339().into()),
            "product.mtime" => Some(self.mtime.to_rfc3339().into()),
            _ => None,
        }
    }
}
