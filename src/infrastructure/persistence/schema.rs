//! Table descriptions for the PostgreSQL managers.

use serde_json::json;
use sqlx::FromRow;
use sqlx::postgres::PgRow;

use crate::domain::entities::{
    PRODUCT, PRODUCT_LISTS, PRODUCT_PROPERTY, Product, ProductListItem, ProductProperty,
    ResourceItem,
};
use crate::error::AppError;

/// Maps a resource type onto its table.
///
/// `columns` translates search keys into SQL column expressions. Keys missing
/// from the table are rejected before any SQL is built.
pub struct ResourceSchema {
    pub resource: &'static str,
    pub table: &'static str,
    pub select: &'static str,
    pub id_column: &'static str,
    pub columns: &'static [(&'static str, &'static str)],
    pub decode: fn(&PgRow) -> Result<ResourceItem, sqlx::Error>,
}

impl ResourceSchema {
    /// Returns the column for a search key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the key is unknown for this resource.
    pub fn column(&self, key: &str) -> Result<&'static str, AppError> {
        self.columns
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, column)| *column)
            .ok_or_else(|| {
                AppError::bad_request(
                    "Unknown search key",
                    json!({"resource": self.resource, "key": key}),
                )
            })
    }
}

fn decode_product(row: &PgRow) -> Result<ResourceItem, sqlx::Error> {
    Product::from_row(row).map(ResourceItem::from)
}

fn decode_property(row: &PgRow) -> Result<ResourceItem, sqlx::Error> {
    ProductProperty::from_row(row).map(ResourceItem::from)
}

fn decode_list_item(row: &PgRow) -> Result<ResourceItem, sqlx::Error> {
    ProductListItem::from_row(row).map(ResourceItem::from)
}

pub static PRODUCT_SCHEMA: ResourceSchema = ResourceSchema {
    resource: PRODUCT,
    table: "products",
    select: r#"id, code, label, "type", status, ctime, mtime"#,
    id_column: "id",
    columns: &[
        ("product.id", "id"),
        ("product.code", "code"),
        ("product.label", "label"),
        ("product.type", r#""type""#),
        ("product.status", "status"),
        ("product.ctime", "ctime"),
        ("product.mtime", "mtime"),
    ],
    decode: decode_product,
};

pub static PRODUCT_PROPERTY_SCHEMA: ResourceSchema = ResourceSchema {
    resource: PRODUCT_PROPERTY,
    table: "product_property",
    select: r#"id, parentid, "type", langid, value"#,
    id_column: "id",
    columns: &[
        ("product.property.id", "id"),
        ("product.property.parentid", "parentid"),
        ("product.property.type", r#""type""#),
        ("product.property.languageid", "langid"),
        ("product.property.value", "value"),
    ],
    decode: decode_property,
};

pub static PRODUCT_LISTS_SCHEMA: ResourceSchema = ResourceSchema {
    resource: PRODUCT_LISTS,
    table: "product_lists",
    select: r#"id, parentid, domain, "type", refid, position, status"#,
    id_column: "id",
    columns: &[
        ("product.lists.id", "id"),
        ("product.lists.parentid", "parentid"),
        ("product.lists.domain", "domain"),
        ("product.lists.type", r#""type""#),
        ("product.lists.refid", "refid"),
        ("product.lists.position", "position"),
        ("product.lists.status", "status"),
    ],
    decode: decode_list_item,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_lookup() {
        assert_eq!(PRODUCT_LISTS_SCHEMA.column("product.lists.parentid").unwrap(), "parentid");
        assert_eq!(PRODUCT_SCHEMA.column("product.type").unwrap(), "\"type\"");
    }

    #[test]
    fn test_column_lookup_rejects_foreign_keys() {
        let err = PRODUCT_PROPERTY_SCHEMA.column("product.lists.domain").unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }
}
