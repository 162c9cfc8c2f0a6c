//! In-memory manager implementation.
//!
//! Holds records in process memory and evaluates [`Criteria`] directly
//! against their attributes. Used for fixtures in tests and local runs
//! without a database.

use async_trait::async_trait;
use serde_json::json;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::criteria::{Criteria, Direction};
use crate::domain::entities::{
    PRODUCT, PRODUCT_LISTS, PRODUCT_PROPERTY, ResourceItem, resource_keys,
};
use crate::domain::manager::{ItemMap, Manager, ManagerFactory};
use crate::error::AppError;

/// Manager over a fixed set of records of one resource type.
pub struct MemoryManager {
    resource: &'static str,
    items: Vec<ResourceItem>,
}

impl MemoryManager {
    pub fn new(resource: &'static str, items: Vec<ResourceItem>) -> Self {
        Self { resource, items }
    }

    /// Rejects keys the resource does not have, whether or not any record matches.
    fn check_key(&self, key: &str) -> Result<(), AppError> {
        if resource_keys(self.resource).contains(&key) {
            return Ok(());
        }
        Err(AppError::bad_request(
            "Unknown search key",
            json!({"resource": self.resource, "key": key}),
        ))
    }

    fn check_conditions(&self, criteria: &Criteria) -> Result<(), AppError> {
        criteria
            .conditions()
            .keys()
            .into_iter()
            .try_for_each(|key| self.check_key(key))
    }

    fn matching(&self, criteria: &Criteria) -> Vec<&ResourceItem> {
        self.items
            .iter()
            .filter(|item| criteria.conditions().matches(&|key: &str| item.attribute(key)))
            .collect()
    }
}

#[async_trait]
impl Manager for MemoryManager {
    fn resource_type(&self) -> &'static str {
        self.resource
    }

    async fn search_items(&self, criteria: &Criteria) -> Result<ItemMap, AppError> {
        self.check_conditions(criteria)?;
        for key in criteria.sort() {
            self.check_key(&key.key)?;
        }

        let mut found = self.matching(criteria);

        found.sort_by(|a, b| {
            for key in criteria.sort() {
                let ord = match (a.attribute(&key.key), b.attribute(&key.key)) {
                    (Some(x), Some(y)) => x.partial_cmp_scalar(&y).unwrap_or(Ordering::Equal),
                    _ => Ordering::Equal,
                };
                let ord = match key.direction {
                    Direction::Asc => ord,
                    Direction::Desc => ord.reverse(),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            a.id().cmp(&b.id())
        });

        let (offset, limit) = criteria.slice();
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        Ok(found
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|item| (item.id(), item.clone()))
            .collect())
    }

    async fn count_items(&self, criteria: &Criteria) -> Result<u64, AppError> {
        self.check_conditions(criteria)?;
        Ok(self.matching(criteria).len() as u64)
    }
}

/// Factory serving [`MemoryManager`]s for the product resources.
#[derive(Default)]
pub struct MemoryManagerFactory {
    records: HashMap<&'static str, Vec<ResourceItem>>,
}

impl MemoryManagerFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds records, routing each to the manager of its resource type.
    pub fn with_items(mut self, items: impl IntoIterator<Item = ResourceItem>) -> Self {
        for item in items {
            self.records
                .entry(item.resource_type())
                .or_default()
                .push(item);
        }
        self
    }
}

impl ManagerFactory for MemoryManagerFactory {
    fn create_manager(&self, resource: &str) -> Result<Arc<dyn Manager>, AppError> {
        let resource = [PRODUCT, PRODUCT_PROPERTY, PRODUCT_LISTS]
            .into_iter()
            .find(|r| *r == resource)
            .ok_or_else(|| {
                AppError::not_found("Unknown resource type", json!({"resource": resource}))
            })?;

        let items = self.records.get(resource).cloned().unwrap_or_default();
        Ok(Arc::new(MemoryManager::new(resource, items)))
    }
}
