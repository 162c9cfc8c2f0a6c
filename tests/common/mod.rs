#![allow(dead_code)]

use axum::extract::ConnectInfo;
use chrono::{TimeZone, Utc};
use product_jsonadm::application::services::ProductService;
use product_jsonadm::domain::entities::{Product, ProductListItem, ProductProperty, ResourceItem};
use product_jsonadm::domain::manager::ManagerFactory;
use product_jsonadm::infrastructure::persistence::MemoryManagerFactory;
use product_jsonadm::state::{AppState, PageLimits};
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;

pub fn product(id: i64, code: &str) -> ResourceItem {
    let ctime = Utc.with_ymd_and_hms(2024, 1, id as u32, 12, 0, 0).unwrap();
    ResourceItem::Product(Product {
        id,
        code: code.to_string(),
        label: code.replace('-', " "),
        kind: "default".to_string(),
        status: 1,
        ctime,
        mtime: ctime,
    })
}

pub fn property(id: i64, parent_id: i64, kind: &str, value: &str) -> ResourceItem {
    ResourceItem::Property(ProductProperty {
        id,
        parent_id,
        kind: kind.to_string(),
        language_id: None,
        value: value.to_string(),
    })
}

pub fn list_item(id: i64, parent_id: i64, domain: &str, ref_id: &str, position: i32) -> ResourceItem {
    ResourceItem::ListItem(ProductListItem {
        id,
        parent_id,
        domain: domain.to_string(),
        kind: "default".to_string(),
        ref_id: ref_id.to_string(),
        position,
        status: 1,
    })
}

/// Three products, properties for two of them, text and media references.
pub fn fixtures() -> Vec<ResourceItem> {
    vec![
        product(1, "shirt-blue"),
        product(2, "shirt-red"),
        product(3, "shoe-black"),
        property(10, 1, "package-weight", "0.25"),
        property(11, 1, "package-height", "3"),
        property(12, 3, "package-weight", "1.1"),
        list_item(20, 1, "text", "100", 0),
        list_item(21, 1, "media", "200", 0),
        list_item(22, 2, "text", "101", 0),
        list_item(23, 2, "text", "102", 1),
    ]
}

pub async fn create_test_product(pool: &PgPool, id: i64, code: &str) {
    sqlx::query("INSERT INTO products (id, code, label) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(code)
        .bind(code.replace('-', " "))
        .execute(pool)
        .await
        .unwrap();
}

pub async fn create_test_property(pool: &PgPool, id: i64, parent_id: i64, kind: &str, lang: Option<&str>) {
    sqlx::query(
        r#"INSERT INTO product_property (id, parentid, "type", langid, value) VALUES ($1, $2, $3, $4, $5)"#,
    )
    .bind(id)
    .bind(parent_id)
    .bind(kind)
    .bind(lang)
    .bind(format!("{kind}-{id}"))
    .execute(pool)
    .await
    .unwrap();
}

pub async fn create_test_list_item(
    pool: &PgPool,
    id: i64,
    parent_id: i64,
    domain: &str,
    ref_id: &str,
    position: i32,
) {
    sqlx::query(
        "INSERT INTO product_lists (id, parentid, domain, refid, position) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(id)
    .bind(parent_id)
    .bind(domain)
    .bind(ref_id)
    .bind(position)
    .execute(pool)
    .await
    .unwrap();
}

/// Inserts the products, properties and list items of [`fixtures`] with the same ids and links.
pub async fn seed_fixtures(pool: &PgPool) {
    create_test_product(pool, 1, "shirt-blue").await;
    create_test_product(pool, 2, "shirt-red").await;
    create_test_product(pool, 3, "shoe-black").await;
    create_test_property(pool, 10, 1, "package-weight", None).await;
    create_test_property(pool, 11, 1, "package-height", None).await;
    create_test_property(pool, 12, 3, "package-weight", Some("de")).await;
    create_test_list_item(pool, 20, 1, "text", "100", 0).await;
    create_test_list_item(pool, 21, 1, "media", "200", 0).await;
    create_test_list_item(pool, 22, 2, "text", "101", 0).await;
    create_test_list_item(pool, 23, 2, "text", "102", 1).await;
}

pub fn create_state_with(factory: Arc<dyn ManagerFactory>, page_limits: PageLimits) -> AppState {
    AppState::new(Arc::new(ProductService::new(factory)), page_limits)
}

pub fn create_test_state() -> AppState {
    let factory = Arc::new(MemoryManagerFactory::new().with_items(fixtures()));
    create_state_with(factory, PageLimits::default())
}

/// Inserts a fixed peer address so connection-info based layers work in tests.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
