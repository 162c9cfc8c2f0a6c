//! Manager traits: the data access seam used by the admin API.
//!
//! A [`Manager`] executes [`Criteria`] against one resource type. Managers are
//! obtained from a [`ManagerFactory`] by resource name (`product`,
//! `product/property`, `product/lists`), which lets callers pick the manager
//! from a relation type given by the client.
//!
//! # Implementations
//!
//! - [`crate::infrastructure::persistence::PgManagerFactory`] - PostgreSQL
//! - [`crate::infrastructure::persistence::MemoryManagerFactory`] - in-memory fixtures
//! - Test mocks available with `cfg(test)`

use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::Arc;

use crate::domain::criteria::Criteria;
use crate::domain::entities::ResourceItem;
use crate::error::AppError;

/// Items keyed by identifier, in search order.
pub type ItemMap = IndexMap<i64, ResourceItem>;

/// Search access to the records of one resource type.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Manager: Send + Sync {
    /// Resource type served by this manager, e.g. `product/property`.
    fn resource_type(&self) -> &'static str;

    /// Returns the items matching `criteria`, honouring its sort and slice.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the criteria reference unknown keys.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn search_items(&self, criteria: &Criteria) -> Result<ItemMap, AppError>;

    /// Counts the items matching the conditions of `criteria`, ignoring its slice.
    ///
    /// # Errors
    ///
    /// Same as [`Manager::search_items`].
    async fn count_items(&self, criteria: &Criteria) -> Result<u64, AppError>;
}

/// Creates managers by resource type.
#[cfg_attr(test, mockall::automock)]
pub trait ManagerFactory: Send + Sync {
    /// Returns the manager for `resource`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no manager exists for `resource`.
    fn create_manager(&self, resource: &str) -> Result<Arc<dyn Manager>, AppError>;
}
