//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::ProductService;

/// Page size bounds for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default: u64,
    pub max: u64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default: 25,
            max: 100,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub product_service: Arc<ProductService>,
    pub page_limits: PageLimits,
}

impl AppState {
    pub fn new(product_service: Arc<ProductService>, page_limits: PageLimits) -> Self {
        Self {
            product_service,
            page_limits,
        }
    }
}
