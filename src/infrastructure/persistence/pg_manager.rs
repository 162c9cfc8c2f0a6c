//! PostgreSQL implementation of the manager trait.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use super::schema::ResourceSchema;
use super::sql;
use crate::domain::criteria::Criteria;
use crate::domain::manager::{ItemMap, Manager};
use crate::error::AppError;

/// PostgreSQL manager for one resource table.
///
/// Queries are assembled from [`Criteria`] at runtime; all values are bound
/// as parameters.
pub struct PgManager {
    pool: Arc<PgPool>,
    schema: &'static ResourceSchema,
}

impl PgManager {
    /// Creates a new manager for the table described by `schema`.
    pub fn new(pool: Arc<PgPool>, schema: &'static ResourceSchema) -> Self {
        Self { pool, schema }
    }
}

#[async_trait]
impl Manager for PgManager {
    fn resource_type(&self) -> &'static str {
        self.schema.resource
    }

    async fn search_items(&self, criteria: &Criteria) -> Result<ItemMap, AppError> {
        let mut query = sql::select_query(self.schema, criteria)?;
        tracing::debug!(resource = self.schema.resource, sql = query.sql(), "Searching items");

        let rows = query.build().fetch_all(self.pool.as_ref()).await?;

        let mut items = ItemMap::with_capacity(rows.len());
        for row in &rows {
            let item = (self.schema.decode)(row)?;
            items.insert(item.id(), item);
        }

        Ok(items)
    }

    async fn count_items(&self, criteria: &Criteria) -> Result<u64, AppError> {
        let mut query = sql::count_query(self.schema, criteria)?;
        tracing::debug!(resource = self.schema.resource, sql = query.sql(), "Counting items");

        let count: i64 = query
            .build_query_scalar()
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(u64::try_from(count).unwrap_or(0))
    }
}
