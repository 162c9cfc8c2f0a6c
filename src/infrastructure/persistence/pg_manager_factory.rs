//! Factory for the PostgreSQL managers.

use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use super::pg_manager::PgManager;
use super::schema::{PRODUCT_LISTS_SCHEMA, PRODUCT_PROPERTY_SCHEMA, PRODUCT_SCHEMA, ResourceSchema};
use crate::domain::manager::{Manager, ManagerFactory};
use crate::error::AppError;

/// Creates [`PgManager`]s sharing one connection pool.
pub struct PgManagerFactory {
    pool: Arc<PgPool>,
}

impl PgManagerFactory {
    /// Creates a new factory with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    fn schema(resource: &str) -> Option<&'static ResourceSchema> {
        [&PRODUCT_SCHEMA, &PRODUCT_PROPERTY_SCHEMA, &PRODUCT_LISTS_SCHEMA]
            .into_iter()
            .find(|schema| schema.resource == resource)
    }
}

impl ManagerFactory for PgManagerFactory {
    fn create_manager(&self, resource: &str) -> Result<Arc<dyn Manager>, AppError> {
        let schema = Self::schema(resource).ok_or_else(|| {
            AppError::not_found("Unknown resource type", json!({"resource": resource}))
        })?;

        tracing::trace!(resource, table = schema.table, "Creating manager");
        Ok(Arc::new(PgManager::new(self.pool.clone(), schema)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lookup() {
        assert_eq!(
            PgManagerFactory::schema("product/property").map(|s| s.table),
            Some("product_property")
        );
        assert_eq!(
            PgManagerFactory::schema("product/lists").map(|s| s.table),
            Some("product_lists")
        );
        assert!(PgManagerFactory::schema("product/text").is_none());
    }
}
