//! Runs against a real database when `TEST_DATABASE_URL` is set, otherwise
//! every test returns early.
mod common;

use axum::http::{Method, StatusCode};
use chrono::Utc;
use common::{app_over, names, send};
use serde_json::json;
use serial_test::serial;
use shared::config::{ConnectionManager, ConnectionPool};
use storefront::{
    abstract_trait::order::repository::OrderCommandRepositoryTrait,
    database::run_migrations,
    di::DependenciesInjectDeps,
    domain::requests::order::{CreateOrderItemRecordRequest, CreateOrderRecordRequest},
    repository::order::command::OrderCommandRepository,
};

async fn fresh_pool() -> Option<ConnectionPool> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = ConnectionManager::new_pool(&url, 1, 5)
        .await
        .expect("connect to test database");
    run_migrations(&pool).await.expect("migrations apply");

    sqlx::query("TRUNCATE order_items, orders, products, categories RESTART IDENTITY CASCADE")
        .execute(&pool)
        .await
        .expect("truncate tables");

    Some(pool)
}

async fn count(pool: &ConnectionPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("count rows")
}

#[tokio::test]
#[serial]
async fn catalog_round_trip_on_postgres() {
    let Some(pool) = fresh_pool().await else {
        return;
    };
    let router = app_over(DependenciesInjectDeps::from_pool(pool.clone()));

    let (status, category) = send(
        &router,
        Method::POST,
        "/categories",
        Some(json!({ "name": "Books" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let category_id = category["id"].as_i64().unwrap();

    let (status, novel) = send(
        &router,
        Method::POST,
        "/products",
        Some(json!({ "name": "Novel", "price": 9.99, "category_id": category_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(novel["category"]["name"], "Books");

    let (status, products) = send(
        &router,
        Method::GET,
        "/products?min_price=5&max_price=10",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&products), vec!["Novel"]);

    let (status, _) = send(
        &router,
        Method::POST,
        "/categories",
        Some(json!({ "name": "Empty" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, categories) = send(
        &router,
        Method::GET,
        "/categories?min_products=1&max_products=1",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&categories), vec!["Books"]);
    assert_eq!(categories[0]["products"][0]["name"], "Novel");

    let (_, categories) = send(
        &router,
        Method::GET,
        "/categories?min_products=0&max_products=0",
        None,
    )
    .await;
    assert_eq!(names(&categories), vec!["Empty"]);

    let (status, _) = send(
        &router,
        Method::DELETE,
        &format!("/categories/{category_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &router,
        Method::GET,
        &format!("/categories/{category_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, product) = send(&router, Method::GET, &format!("/products/{}", novel["id"]), None).await;
    assert!(product["category"].is_null());
}

#[tokio::test]
#[serial]
async fn unknown_category_is_a_foreign_key_error() {
    let Some(pool) = fresh_pool().await else {
        return;
    };
    let router = app_over(DependenciesInjectDeps::from_pool(pool.clone()));

    let (status, body) = send(
        &router,
        Method::POST,
        "/products",
        Some(json!({ "name": "Orphan", "price": 1.0, "category_id": 404 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Foreign key violation"));
    assert_eq!(count(&pool, "products").await, 0);
}

#[tokio::test]
#[serial]
async fn search_treats_wildcards_literally() {
    let Some(pool) = fresh_pool().await else {
        return;
    };
    let router = app_over(DependenciesInjectDeps::from_pool(pool.clone()));

    for name in ["100% Cotton", "1000 Cottons", "snake_case", "snakeXcase"] {
        let (status, _) = send(
            &router,
            Method::POST,
            "/products",
            Some(json!({ "name": name, "price": 1.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = send(&router, Method::GET, "/products?search=0%25", None).await;
    assert_eq!(names(&body), vec!["100% Cotton"]);

    let (_, body) = send(&router, Method::GET, "/products?search=E_C", None).await;
    assert_eq!(names(&body), vec!["snake_case"]);
}

#[tokio::test]
#[serial]
async fn failed_item_insert_rolls_back_the_order() {
    let Some(pool) = fresh_pool().await else {
        return;
    };
    let repo = OrderCommandRepository::new(pool.clone());

    let order = CreateOrderRecordRequest {
        user_id: 1,
        status: "pending".into(),
        total: 0.0,
        placed_at: Utc::now(),
    };
    let items = [CreateOrderItemRecordRequest {
        product_id: 1,
        quantity: 0,
        unit_price: 1.0,
    }];

    assert!(repo.create_order(&order, &items).await.is_err());
    assert_eq!(count(&pool, "orders").await, 0);
    assert_eq!(count(&pool, "order_items").await, 0);
}

#[tokio::test]
#[serial]
async fn order_lifecycle_on_postgres() {
    let Some(pool) = fresh_pool().await else {
        return;
    };
    let router = app_over(DependenciesInjectDeps::from_pool(pool.clone()));

    let (_, pen) = send(
        &router,
        Method::POST,
        "/products",
        Some(json!({ "name": "Pen", "price": 10.0 })),
    )
    .await;

    let (status, order) = send(
        &router,
        Method::POST,
        "/orders",
        Some(json!({
            "user_id": 1,
            "items": [{ "product_id": pen["id"], "quantity": 2, "unit_price": 10 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["total"], 20.0);
    assert_eq!(order["status"], "pending");

    let (status, updated) = send(
        &router,
        Method::PUT,
        &format!("/orders/{}", order["id"]),
        Some(json!({ "status": "paid" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["items"], order["items"]);

    let (status, _) = send(
        &router,
        Method::DELETE,
        &format!("/orders/{}", order["id"]),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(count(&pool, "order_items").await, 0);
}

#[tokio::test]
#[serial]
async fn long_names_and_statuses_are_stored() {
    let Some(pool) = fresh_pool().await else {
        return;
    };
    let router = app_over(DependenciesInjectDeps::from_pool(pool.clone()));
    let long_name = "n".repeat(300);
    let long_status = "s".repeat(60);

    let (status, category) = send(
        &router,
        Method::POST,
        "/categories",
        Some(json!({ "name": long_name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(category["name"], long_name.as_str());

    let (status, product) = send(
        &router,
        Method::POST,
        "/products",
        Some(json!({ "name": long_name, "price": 1.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, order) = send(
        &router,
        Method::POST,
        "/orders",
        Some(json!({
            "user_id": 1,
            "status": long_status,
            "items": [{ "product_id": product["id"], "quantity": 1, "unit_price": 1.0 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["status"], long_status.as_str());
}
