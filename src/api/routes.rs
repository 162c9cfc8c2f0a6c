//! Product route configuration.

use crate::api::handlers::{product_get_handler, product_list_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Routes of the product JSON API client.
///
/// # Endpoints
///
/// - `GET /product`        - List products with `include`, paging, sorting and code filter
/// - `GET /product/{id}`   - Single product with `include`
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/product", get(product_list_handler))
        .route("/product/{id}", get(product_get_handler))
}
