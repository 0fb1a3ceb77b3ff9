#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use serde_json::Value;
use shared::errors::RepositoryError;
use std::sync::{
    Arc, Mutex, MutexGuard,
    atomic::{AtomicBool, Ordering},
};
use storefront::{
    abstract_trait::{
        category::repository::{CategoryCommandRepositoryTrait, CategoryQueryRepositoryTrait},
        order::repository::{OrderCommandRepositoryTrait, OrderQueryRepositoryTrait},
        product::repository::{ProductCommandRepositoryTrait, ProductQueryRepositoryTrait},
    },
    di::DependenciesInjectDeps,
    domain::requests::{
        category::CreateCategoryRequest,
        order::{CreateOrderItemRecordRequest, CreateOrderRecordRequest},
        product::CreateProductRequest,
    },
    filter::{CategoryFilters, ProductFilters},
    handler::AppRouter,
    model::{
        category::Category as CategoryModel, order::Order as OrderModel,
        order_item::OrderItem as OrderItemModel, product::Product as ProductModel,
    },
    state::AppState,
};
use tower::ServiceExt;

#[derive(Default)]
pub struct Tables {
    pub categories: Vec<CategoryModel>,
    pub products: Vec<ProductModel>,
    pub orders: Vec<OrderModel>,
    pub items: Vec<OrderItemModel>,
    next_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Store double behind every repository trait. Mirrors the schema's
/// referential rules: deleting a category detaches its products, deleting an
/// order removes its items, and a product must point at a stored category.
#[derive(Clone, Default)]
pub struct InMemoryDb {
    tables: Arc<Mutex<Tables>>,
    fail_reads: Arc<AtomicBool>,
}

impl InMemoryDb {
    pub fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("tables lock poisoned")
    }

    /// Makes every list query fail like a dropped connection.
    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    fn check_reads(&self) -> Result<(), RepositoryError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            Err(RepositoryError::Custom("connection reset by peer".into()))
        } else {
            Ok(())
        }
    }

    pub fn deps(&self) -> DependenciesInjectDeps {
        DependenciesInjectDeps {
            category_query: Arc::new(self.clone()),
            category_command: Arc::new(self.clone()),
            product_query: Arc::new(self.clone()),
            product_command: Arc::new(self.clone()),
            order_query: Arc::new(self.clone()),
            order_command: Arc::new(self.clone()),
        }
    }
}

#[async_trait]
impl CategoryQueryRepositoryTrait for InMemoryDb {
    async fn find_all(
        &self,
        filters: &CategoryFilters,
    ) -> Result<Vec<CategoryModel>, RepositoryError> {
        self.check_reads()?;
        let tables = self.tables();
        Ok(tables
            .categories
            .iter()
            .filter(|c| filters.search.as_ref().is_none_or(|s| s.matches(&c.name)))
            .filter(|c| {
                filters.product_count.as_ref().is_none_or(|range| {
                    let owned = tables
                        .products
                        .iter()
                        .filter(|p| p.category_id == Some(c.id))
                        .count();
                    range.matches(owned as i64)
                })
            })
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<CategoryModel>, RepositoryError> {
        Ok(self.tables().categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<CategoryModel>, RepositoryError> {
        Ok(self
            .tables()
            .categories
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CategoryCommandRepositoryTrait for InMemoryDb {
    async fn create_category(
        &self,
        req: &CreateCategoryRequest,
    ) -> Result<CategoryModel, RepositoryError> {
        let mut tables = self.tables();
        let category = CategoryModel {
            id: tables.next_id(),
            name: req.name.clone(),
        };
        tables.categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        category: &CategoryModel,
    ) -> Result<CategoryModel, RepositoryError> {
        let mut tables = self.tables();
        let stored = tables
            .categories
            .iter_mut()
            .find(|c| c.id == category.id)
            .ok_or(RepositoryError::NotFound)?;
        *stored = category.clone();
        Ok(stored.clone())
    }

    async fn delete_category(&self, id: i32) -> Result<(), RepositoryError> {
        let mut tables = self.tables();
        let before = tables.categories.len();
        tables.categories.retain(|c| c.id != id);
        if tables.categories.len() == before {
            return Err(RepositoryError::NotFound);
        }
        for product in tables.products.iter_mut() {
            if product.category_id == Some(id) {
                product.category_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for InMemoryDb {
    async fn find_all(
        &self,
        filters: &ProductFilters,
    ) -> Result<Vec<ProductModel>, RepositoryError> {
        self.check_reads()?;
        Ok(self
            .tables()
            .products
            .iter()
            .filter(|p| filters.search.as_ref().is_none_or(|s| s.matches(&p.name)))
            .filter(|p| filters.price.as_ref().is_none_or(|r| r.matches(p.price)))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        Ok(self.tables().products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_category_ids(
        &self,
        category_ids: &[i32],
    ) -> Result<Vec<ProductModel>, RepositoryError> {
        Ok(self
            .tables()
            .products
            .iter()
            .filter(|p| p.category_id.is_some_and(|id| category_ids.contains(&id)))
            .cloned()
            .collect())
    }

    async fn find_existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, RepositoryError> {
        Ok(self
            .tables()
            .products
            .iter()
            .map(|p| p.id)
            .filter(|id| ids.contains(id))
            .collect())
    }
}

fn check_category(tables: &Tables, category_id: Option<i32>) -> Result<(), RepositoryError> {
    match category_id {
        Some(id) if !tables.categories.iter().any(|c| c.id == id) => Err(
            RepositoryError::ForeignKey("products_category_id_fkey".into()),
        ),
        _ => Ok(()),
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for InMemoryDb {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        let mut tables = self.tables();
        check_category(&tables, req.category_id)?;
        let product = ProductModel {
            id: tables.next_id(),
            name: req.name.clone(),
            price: req.price,
            category_id: req.category_id,
        };
        tables.products.push(product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        product: &ProductModel,
    ) -> Result<ProductModel, RepositoryError> {
        let mut tables = self.tables();
        check_category(&tables, product.category_id)?;
        let stored = tables
            .products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or(RepositoryError::NotFound)?;
        *stored = product.clone();
        Ok(stored.clone())
    }

    async fn delete_product(&self, id: i32) -> Result<(), RepositoryError> {
        let mut tables = self.tables();
        let before = tables.products.len();
        tables.products.retain(|p| p.id != id);
        if tables.products.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for InMemoryDb {
    async fn find_all(&self) -> Result<Vec<OrderModel>, RepositoryError> {
        self.check_reads()?;
        Ok(self.tables().orders.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<OrderModel>, RepositoryError> {
        Ok(self.tables().orders.iter().find(|o| o.id == id).cloned())
    }

    async fn find_items_by_order_ids(
        &self,
        order_ids: &[i32],
    ) -> Result<Vec<OrderItemModel>, RepositoryError> {
        Ok(self
            .tables()
            .items
            .iter()
            .filter(|i| order_ids.contains(&i.order_id))
            .cloned()
            .collect())
    }
}

fn insert_items(
    tables: &mut Tables,
    order_id: i32,
    items: &[CreateOrderItemRecordRequest],
) -> Vec<OrderItemModel> {
    items
        .iter()
        .map(|item| {
            let row = OrderItemModel {
                id: tables.next_id(),
                order_id,
                product_id: item.product_id,
                quantity: item.quantity,
                unit_price: item.unit_price,
            };
            tables.items.push(row.clone());
            row
        })
        .collect()
}

#[async_trait]
impl OrderCommandRepositoryTrait for InMemoryDb {
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
        items: &[CreateOrderItemRecordRequest],
    ) -> Result<(OrderModel, Vec<OrderItemModel>), RepositoryError> {
        let mut tables = self.tables();
        let order = OrderModel {
            id: tables.next_id(),
            user_id: req.user_id,
            status: req.status.clone(),
            total: req.total,
            placed_at: req.placed_at,
        };
        tables.orders.push(order.clone());
        let inserted = insert_items(&mut tables, order.id, items);
        Ok((order, inserted))
    }

    async fn update_order(
        &self,
        order: &OrderModel,
        items: Option<&[CreateOrderItemRecordRequest]>,
    ) -> Result<(OrderModel, Vec<OrderItemModel>), RepositoryError> {
        let mut tables = self.tables();
        let stored = tables
            .orders
            .iter_mut()
            .find(|o| o.id == order.id)
            .ok_or(RepositoryError::NotFound)?;
        *stored = order.clone();

        let current = match items {
            Some(items) => {
                tables.items.retain(|i| i.order_id != order.id);
                insert_items(&mut tables, order.id, items)
            }
            None => tables
                .items
                .iter()
                .filter(|i| i.order_id == order.id)
                .cloned()
                .collect(),
        };
        Ok((order.clone(), current))
    }

    async fn delete_order(&self, id: i32) -> Result<(), RepositoryError> {
        let mut tables = self.tables();
        let before = tables.orders.len();
        tables.orders.retain(|o| o.id != id);
        if tables.orders.len() == before {
            return Err(RepositoryError::NotFound);
        }
        tables.items.retain(|i| i.order_id != id);
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub db: InMemoryDb,
}

pub fn test_app() -> TestApp {
    let db = InMemoryDb::default();
    let state = AppState::from_deps(db.deps());
    TestApp {
        router: AppRouter::build(Arc::new(state)),
        db,
    }
}

pub fn app_over(deps: DependenciesInjectDeps) -> Router {
    AppRouter::build(Arc::new(AppState::from_deps(deps)))
}

pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => Request::builder().method(method).uri(uri).body(Body::empty()),
    }
    .expect("valid request");

    let (status, bytes) = dispatch(router, request).await;
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Sends a raw JSON-typed body, for payloads that are not valid JSON.
pub async fn send_raw(router: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request");

    let (status, bytes) = dispatch(router, request).await;
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get_text(router: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request");
    let (status, bytes) = dispatch(router, request).await;
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

async fn dispatch(router: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes()
        .to_vec();
    (status, bytes)
}

impl TestApp {
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        send(&self.router, method, uri, body).await
    }

    pub async fn send_raw(&self, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
        send_raw(&self.router, method, uri, body).await
    }

    pub async fn create_category(&self, name: &str) -> i32 {
        let (status, body) = self
            .send(Method::POST, "/categories", Some(serde_json::json!({ "name": name })))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().expect("category id") as i32
    }

    pub async fn create_product(&self, name: &str, price: f64, category_id: Option<i32>) -> i32 {
        let (status, body) = self
            .send(
                Method::POST,
                "/products",
                Some(serde_json::json!({
                    "name": name,
                    "price": price,
                    "category_id": category_id,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().expect("product id") as i32
    }
}

pub fn names(list: &Value) -> Vec<String> {
    list.as_array()
        .expect("array body")
        .iter()
        .map(|v| v["name"].as_str().unwrap_or_default().to_string())
        .collect()
}
