//! Product service: product lookup and relationship expansion.

use serde_json::json;
use std::sync::Arc;

use crate::domain::criteria::{Combinator, Criteria, Operator};
use crate::domain::entities::{PRODUCT, PRODUCT_LISTS, ResourceItem};
use crate::domain::manager::{ItemMap, ManagerFactory};
use crate::error::AppError;

/// Relation types fetched as child records (records with a `parentid`
/// referencing a product). Other requested types are ignored by
/// [`ProductService::get_child_items`].
pub const CHILD_RESOURCES: &[&str] = &["product/property"];

/// Upper bound on records returned by one relationship search.
const RELATION_LIMIT: u64 = i32::MAX as u64;

/// Related records fetched for a batch of products.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct IncludedItems {
    /// Child records of all allow-listed relation types, in search order.
    pub children: Vec<ResourceItem>,
    /// List records of the requested domains, keyed by list item id.
    pub lists: ItemMap,
}

impl IncludedItems {
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.lists.is_empty()
    }
}

/// Service for reading products and the records related to them.
///
/// All work is delegated to managers obtained from the [`ManagerFactory`];
/// the service only decides which managers to ask and with which criteria.
pub struct ProductService {
    factory: Arc<dyn ManagerFactory>,
}

impl ProductService {
    /// Creates a new product service.
    pub fn new(factory: Arc<dyn ManagerFactory>) -> Self {
        Self { factory }
    }

    /// Searches products.
    ///
    /// # Errors
    ///
    /// Propagates manager errors unchanged.
    pub async fn search_products(&self, criteria: &Criteria) -> Result<ItemMap, AppError> {
        let manager = self.factory.create_manager(PRODUCT)?;
        manager.search_items(criteria).await
    }

    /// Counts products matching the conditions of `criteria`.
    ///
    /// # Errors
    ///
    /// Propagates manager errors unchanged.
    pub async fn count_products(&self, criteria: &Criteria) -> Result<u64, AppError> {
        let manager = self.factory.create_manager(PRODUCT)?;
        manager.count_items(criteria).await
    }

    /// Retrieves a single product by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no product has this id.
    pub async fn get_product(&self, id: i64) -> Result<ResourceItem, AppError> {
        let mut search = Criteria::new();
        search
            .set_conditions(Criteria::compare(Operator::Eq, "product.id", id))
            .set_slice(0, 1);

        self.search_products(&search)
            .await?
            .shift_remove(&id)
            .ok_or_else(|| AppError::not_found("Product not found", json!({"id": id})))
    }

    /// Returns the child records of `items` for the requested relation types.
    ///
    /// Only types listed in [`CHILD_RESOURCES`] are fetched, one search per
    /// type, each matching `<type>.parentid` against all item ids. Other types
    /// are dropped without error. When no requested type is allow-listed no
    /// manager is created.
    ///
    /// # Errors
    ///
    /// Propagates factory and manager errors unchanged.
    pub async fn get_child_items(
        &self,
        items: &ItemMap,
        include: &[String],
    ) -> Result<Vec<ResourceItem>, AppError> {
        let ids: Vec<i64> = items.keys().copied().collect();
        let mut seen: Vec<&str> = Vec::new();
        let mut list = Vec::new();

        for resource in include.iter().map(String::as_str) {
            if !CHILD_RESOURCES.contains(&resource) || seen.contains(&resource) {
                continue;
            }
            seen.push(resource);

            let manager = self.factory.create_manager(resource)?;

            let key = format!("{}.parentid", resource.replace('/', "."));
            let mut search = Criteria::new();
            search
                .set_conditions(Criteria::compare(Operator::Eq, key, ids.clone()))
                .set_slice(0, RELATION_LIMIT);

            let found = manager.search_items(&search).await?;
            tracing::debug!(resource, items = ids.len(), found = found.len(), "Fetched child items");

            list.extend(found.into_values());
        }

        Ok(list)
    }

    /// Returns the list records linking `items` to the requested domains.
    ///
    /// Issues exactly one search on `product/lists`, matching the item ids
    /// and all requested domains at once. Domains are not restricted.
    ///
    /// # Errors
    ///
    /// Propagates factory and manager errors unchanged.
    pub async fn get_list_items(
        &self,
        items: &ItemMap,
        include: &[String],
    ) -> Result<ItemMap, AppError> {
        let manager = self.factory.create_manager(PRODUCT_LISTS)?;
        let ids: Vec<i64> = items.keys().copied().collect();

        let mut search = Criteria::new();
        let expr = Criteria::combine(
            Combinator::And,
            vec![
                Criteria::compare(Operator::Eq, "product.lists.parentid", ids.clone()),
                Criteria::compare(Operator::Eq, "product.lists.domain", include),
            ],
        );
        search.set_conditions(expr).set_slice(0, RELATION_LIMIT);

        let found = manager.search_items(&search).await?;
        tracing::debug!(
            domains = ?include,
            items = ids.len(),
            found = found.len(),
            "Fetched list items"
        );

        Ok(found)
    }

    /// Fetches child and list records for `items`.
    ///
    /// # Errors
    ///
    /// Propagates factory and manager errors unchanged.
    pub async fn get_included(
        &self,
        items: &ItemMap,
        include: &[String],
    ) -> Result<IncludedItems, AppError> {
        let children = self.get_child_items(items, include).await?;
        let lists = self.get_list_items(items, include).await?;

        Ok(IncludedItems { children, lists })
    }

    /// Checks that the product manager answers.
    ///
    /// # Errors
    ///
    /// Propagates factory and manager errors unchanged.
    pub async fn ping(&self) -> Result<u64, AppError> {
        self.count_products(&Criteria::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::criteria::{Expr, Value};
    use crate::domain::entities::{Product, ProductListItem, ProductProperty};
    use crate::domain::manager::{Manager, MockManager, MockManagerFactory};
    use chrono::Utc;

    fn product(id: i64) -> ResourceItem {
        let now = Utc::now();
        ResourceItem::Product(Product {
            id,
            code: format!("p{id}"),
            label: format!("Product {id}"),
            kind: "default".to_string(),
            status: 1,
            ctime: now,
            mtime: now,
        })
    }

    fn property(id: i64, parent_id: i64) -> ResourceItem {
        ResourceItem::Property(ProductProperty {
            id,
            parent_id,
            kind: "package-weight".to_string(),
            language_id: None,
            value: "1.0".to_string(),
        })
    }

    fn list_item(id: i64, parent_id: i64, domain: &str) -> ResourceItem {
        ResourceItem::ListItem(ProductListItem {
            id,
            parent_id,
            domain: domain.to_string(),
            kind: "default".to_string(),
            ref_id: format!("{domain}-{id}"),
            position: 0,
            status: 1,
        })
    }

    fn items(ids: &[i64]) -> ItemMap {
        ids.iter().map(|id| (*id, product(*id))).collect()
    }

    fn include(types: &[&str]) -> Vec<String> {
        types.iter().map(|t| t.to_string()).collect()
    }

    fn map(list: Vec<ResourceItem>) -> ItemMap {
        list.into_iter().map(|i| (i.id(), i)).collect()
    }

    #[tokio::test]
    async fn test_child_items_empty_include_creates_no_manager() {
        let mut factory = MockManagerFactory::new();
        factory.expect_create_manager().times(0);

        let service = ProductService::new(Arc::new(factory));

        let result = service.get_child_items(&items(&[1, 2]), &[]).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_child_items_ignores_types_not_allowed() {
        let mut factory = MockManagerFactory::new();
        factory.expect_create_manager().times(0);

        let service = ProductService::new(Arc::new(factory));

        let result = service
            .get_child_items(&items(&[1]), &include(&["text", "media", "product/lists"]))
            .await
            .unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_child_items_queries_parentid_with_all_item_ids() {
        let mut manager = MockManager::new();
        manager
            .expect_search_items()
            .withf(|c| {
                *c.conditions()
                    == Expr::Compare {
                        op: Operator::Eq,
                        key: "product.property.parentid".to_string(),
                        value: Value::List(vec![Value::Int(3), Value::Int(1), Value::Int(2)]),
                    }
            })
            .times(1)
            .returning(|_| Ok(map(vec![property(10, 1), property(11, 3)])));

        let mut factory = MockManagerFactory::new();
        factory
            .expect_create_manager()
            .withf(|r| r == "product/property")
            .times(1)
            .return_once(move |_| Ok(Arc::new(manager) as Arc<dyn Manager>));

        let service = ProductService::new(Arc::new(factory));

        let result = service
            .get_child_items(&items(&[3, 1, 2]), &include(&["text", "product/property"]))
            .await
            .unwrap();

        let ids: Vec<i64> = result.iter().map(ResourceItem::id).collect();
        assert_eq!(ids, vec![10, 11]);
    }

    #[tokio::test]
    async fn test_child_items_duplicate_type_searched_once() {
        let mut manager = MockManager::new();
        manager
            .expect_search_items()
            .times(1)
            .returning(|_| Ok(ItemMap::new()));

        let mut factory = MockManagerFactory::new();
        factory
            .expect_create_manager()
            .times(1)
            .return_once(move |_| Ok(Arc::new(manager) as Arc<dyn Manager>));

        let service = ProductService::new(Arc::new(factory));

        let result = service
            .get_child_items(
                &items(&[1]),
                &include(&["product/property", "product/property"]),
            )
            .await
            .unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_child_items_propagates_manager_error() {
        let mut manager = MockManager::new();
        manager
            .expect_search_items()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let mut factory = MockManagerFactory::new();
        factory
            .expect_create_manager()
            .return_once(move |_| Ok(Arc::new(manager) as Arc<dyn Manager>));

        let service = ProductService::new(Arc::new(factory));

        let result = service
            .get_child_items(&items(&[1]), &include(&["product/property"]))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_list_items_single_search_for_all_domains() {
        let mut manager = MockManager::new();
        manager
            .expect_search_items()
            .withf(|c| {
                *c.conditions()
                    == Expr::Combine {
                        op: Combinator::And,
                        exprs: vec![
                            Criteria::compare(Operator::Eq, "product.lists.parentid", vec![1_i64, 2]),
                            Criteria::compare(
                                Operator::Eq,
                                "product.lists.domain",
                                vec!["text", "media", "unknown"],
                            ),
                        ],
                    }
            })
            .times(1)
            .returning(|_| Ok(map(vec![list_item(20, 1, "text"), list_item(21, 2, "media")])));

        let mut factory = MockManagerFactory::new();
        factory
            .expect_create_manager()
            .withf(|r| r == "product/lists")
            .times(1)
            .return_once(move |_| Ok(Arc::new(manager) as Arc<dyn Manager>));

        let service = ProductService::new(Arc::new(factory));

        let result = service
            .get_list_items(&items(&[1, 2]), &include(&["text", "media", "unknown"]))
            .await
            .unwrap();

        assert_eq!(result.keys().copied().collect::<Vec<_>>(), vec![20, 21]);
    }

    #[tokio::test]
    async fn test_list_items_empty_domains_still_searches_once() {
        let mut manager = MockManager::new();
        manager
            .expect_search_items()
            .withf(|c| match c.conditions() {
                Expr::Combine { exprs, .. } => {
                    exprs[1]
                        == Criteria::compare(
                            Operator::Eq,
                            "product.lists.domain",
                            Value::List(Vec::new()),
                        )
                }
                _ => false,
            })
            .times(1)
            .returning(|_| Ok(ItemMap::new()));

        let mut factory = MockManagerFactory::new();
        factory
            .expect_create_manager()
            .times(1)
            .return_once(move |_| Ok(Arc::new(manager) as Arc<dyn Manager>));

        let service = ProductService::new(Arc::new(factory));

        let result = service.get_list_items(&items(&[1]), &[]).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_list_items_unknown_manager_error() {
        let mut factory = MockManagerFactory::new();
        factory
            .expect_create_manager()
            .returning(|r| Err(AppError::not_found("Unknown resource type", json!({"resource": r}))));

        let service = ProductService::new(Arc::new(factory));

        let result = service.get_list_items(&items(&[1]), &include(&["text"])).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let mut manager = MockManager::new();
        manager
            .expect_search_items()
            .times(1)
            .returning(|_| Ok(ItemMap::new()));

        let mut factory = MockManagerFactory::new();
        factory
            .expect_create_manager()
            .withf(|r| r == "product")
            .return_once(move |_| Ok(Arc::new(manager) as Arc<dyn Manager>));

        let service = ProductService::new(Arc::new(factory));

        let result = service.get_product(99).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_product_found() {
        let mut manager = MockManager::new();
        manager
            .expect_search_items()
            .withf(|c| c.slice() == (0, 1))
            .returning(|_| Ok(items(&[4])));

        let mut factory = MockManagerFactory::new();
        factory
            .expect_create_manager()
            .return_once(move |_| Ok(Arc::new(manager) as Arc<dyn Manager>));

        let service = ProductService::new(Arc::new(factory));

        let item = service.get_product(4).await.unwrap();

        assert_eq!(item.id(), 4);
        assert_eq!(item.resource_type(), PRODUCT);
    }
}
