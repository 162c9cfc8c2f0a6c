//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health`               - Health check (public)
//! - `/admin/jsonadm/product*`   - Product JSON API, wrapped in the configured decorators
//!
//! # Middleware
//!
//! - **Decorators** - `trace`, `accesslog`, `ratelimit`, see [`crate::api::decorators`]
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::decorators::{self, Decorator};
use crate::api::handlers::health_handler;
use crate::api::middleware::rate_limit::RateLimit;
use crate::state::AppState;
use anyhow::Result;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the application router without path normalization.
///
/// # Errors
///
/// Returns an error if a decorator cannot be built.
pub fn build_router(
    state: AppState,
    decorators: &[Decorator],
    rate_limit: RateLimit,
) -> Result<Router> {
    let product_router = decorators::apply(api::routes::product_routes(), decorators, rate_limit)?;

    Ok(Router::new()
        .route("/health", get(health_handler))
        .nest("/admin/jsonadm", product_router)
        .with_state(state))
}

/// Constructs the application router with all routes and middleware.
///
/// # Errors
///
/// Returns an error if a decorator cannot be built.
pub fn app_router(
    state: AppState,
    decorators: &[Decorator],
    rate_limit: RateLimit,
) -> Result<NormalizePath<Router>> {
    let router = build_router(state, decorators, rate_limit)?;
    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}
