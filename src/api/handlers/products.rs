//! Handlers for the product endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::api::dto::jsonapi::Document;
use crate::api::dto::query::{IncludeParams, ProductListParams, parse_include};
use crate::domain::criteria::{Criteria, Operator};
use crate::domain::manager::ItemMap;
use crate::error::AppError;
use crate::state::AppState;

/// Lists products with their requested relationships.
///
/// # Endpoint
///
/// `GET /admin/jsonadm/product`
///
/// # Query Parameters
///
/// - `include` (optional): Comma separated relation types. `product/property`
///   adds property records; any other value is treated as a list domain
///   (`text`, `media`, ...)
/// - `page[offset]` (optional): Number of products to skip (default: 0)
/// - `page[limit]` (optional): Products per page (default and maximum from config)
/// - `sort` (optional): Sort keys, e.g. `-product.ctime,product.code`
/// - `filter[code]` (optional): Product code prefix
///
/// # Errors
///
/// Returns 400 if parameters are invalid or reference unknown sort keys.
pub async fn product_list_handler(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> Result<Json<Document>, AppError> {
    params.validate()?;

    let include = parse_include(params.include.as_deref());
    let limit = params
        .limit
        .unwrap_or(state.page_limits.default)
        .min(state.page_limits.max);

    let mut criteria = Criteria::new();
    if let Some(code) = &params.code {
        criteria.set_conditions(Criteria::compare(Operator::Like, "product.code", code));
    }
    if let Some(sort) = &params.sort {
        criteria.set_sort(Criteria::parse_sort(sort)?);
    }
    criteria.set_slice(params.offset.unwrap_or(0), limit);

    let (items, total) = tokio::try_join!(
        state.product_service.search_products(&criteria),
        state.product_service.count_products(&criteria),
    )?;

    let included = state.product_service.get_included(&items, &include).await?;

    Ok(Json(Document::collection(&items, &included, total)?))
}

/// Retrieves one product with its requested relationships.
///
/// # Endpoint
///
/// `GET /admin/jsonadm/product/{id}`
///
/// # Errors
///
/// Returns 404 if the product does not exist.
pub async fn product_get_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Query(params): Query<IncludeParams>,
) -> Result<Json<Document>, AppError> {
    let include = parse_include(params.include.as_deref());

    let item = state.product_service.get_product(id).await?;

    let items: ItemMap = [(item.id(), item.clone())].into_iter().collect();
    let included = state.product_service.get_included(&items, &include).await?;

    Ok(Json(Document::single(&item, &included)?))
}
