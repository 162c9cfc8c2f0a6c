//! Query parameters of the product endpoints.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

/// Query parameters for `GET /admin/jsonadm/product`.
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProductListParams {
    /// Comma separated relation types, e.g. `product/property,text`.
    #[serde(default)]
    pub include: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default, rename = "page[offset]")]
    pub offset: Option<u64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default, rename = "page[limit]")]
    #[validate(range(min = 1))]
    pub limit: Option<u64>,

    /// Comma separated sort keys, `-` prefix for descending.
    #[serde(default)]
    pub sort: Option<String>,

    /// Product code prefix.
    #[serde(default, rename = "filter[code]")]
    #[validate(length(min = 1, max = 64))]
    pub code: Option<String>,
}

/// Query parameters for `GET /admin/jsonadm/product/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct IncludeParams {
    #[serde(default)]
    pub include: Option<String>,
}

/// Splits an `include` parameter into relation types.
///
/// Entries are trimmed, empty entries dropped and duplicates removed while
/// keeping the first occurrence.
pub fn parse_include(raw: Option<&str>) -> Vec<String> {
    let mut include: Vec<String> = Vec::new();

    for part in raw.unwrap_or_default().split(',').map(str::trim) {
        if !part.is_empty() && !include.iter().any(|i| i == part) {
            include.push(part.to_string());
        }
    }

    include
}
