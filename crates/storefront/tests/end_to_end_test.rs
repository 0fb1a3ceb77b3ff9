mod common;

use axum::http::{Method, StatusCode};
use common::{get_text, names, test_app};
use serde_json::json;

#[tokio::test]
async fn catalog_round_trip() {
    let app = test_app();

    let (status, category) = app
        .send(Method::POST, "/categories", Some(json!({ "name": "Books" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let category_id = category["id"].as_i64().unwrap();

    let (status, _) = app
        .send(
            Method::POST,
            "/products",
            Some(json!({ "name": "Novel", "price": 9.99, "category_id": category_id })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, products) = app
        .send(Method::GET, "/products?min_price=5&max_price=10", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&products), vec!["Novel"]);
    assert_eq!(products[0]["category"]["name"], "Books");

    let (status, _) = app
        .send(Method::DELETE, &format!("/categories/{category_id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send(Method::GET, &format!("/categories/{category_id}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn metrics_expose_service_counters() {
    let app = test_app();
    app.create_category("Books").await;
    app.send(Method::GET, "/categories/77", None).await;

    let (status, body) = get_text(&app.router, "/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("category_command_service_request_counter"));
    assert!(body.contains("category_query_service_request_counter"));
    assert!(body.contains("status=\"NotFound\""));
    assert!(body.contains("process_start_time_seconds"));
}

#[tokio::test]
async fn openapi_document_lists_every_resource() {
    let app = test_app();

    let (status, doc) = app.send(Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    for path in [
        "/categories",
        "/categories/{id}",
        "/products",
        "/products/{id}",
        "/orders",
        "/orders/{id}",
    ] {
        assert!(doc["paths"][path].is_object(), "missing {path}");
    }
}
