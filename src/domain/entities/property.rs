//! Product property entity.

use serde::Serialize;

use crate::domain::criteria::Value;

/// A typed property value attached to a product, e.g. package weight or ISBN.
///
/// `parent_id` references [`super::Product::id`].
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct ProductProperty {
    #[serde(rename = "product.property.id")]
    pub id: i64,
    #[serde(rename = "product.property.parentid")]
    #[sqlx(rename = "parentid")]
    pub parent_id: i64,
    #[serde(rename = "product.property.type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    #[serde(rename = "product.property.languageid")]
    #[sqlx(rename = "langid")]
    pub language_id: Option<String>,
    #[serde(rename = "product.property.value")]
    pub value: String,
}

impl ProductProperty {
    /// Search keys understood by [`ProductProperty::attribute`].
    pub const KEYS: &'static [&'static str] = &[
        "product.property.id",
        "product.property.parentid",
        "product.property.type",
        "product.property.languageid",
        "product.property.value",
    ];

    /// Returns the value of a `product.property.*` search key.
    pub fn attribute(&self, key: &str) -> Option<Value> {
        match key {
            "product.property.id" => Some(self.id.into()),
            "product.property.parentid" => Some(self.parent_id.into()),
            "product.property.type" => Some(self.kind.as_str().into()),
            "product.property.languageid" => Some(self.language_id.as_deref().into()),
            "product.property.value" => Some(self.value.as_str().into()),
            _ => None,
        }
    }
}
