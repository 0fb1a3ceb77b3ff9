mod common;

use axum::http::{Method, StatusCode};
use common::{names, test_app};
use serde_json::json;

#[tokio::test]
async fn create_category_returns_record_with_new_id() {
    let app = test_app();

    let (status, body) = app
        .send(Method::POST, "/categories", Some(json!({ "name": "Books" })))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["name"], "Books");
    assert_eq!(body["products"], json!([]));

    let second = app.create_category("Games").await;
    assert_ne!(second as i64, body["id"].as_i64().unwrap());
}

#[tokio::test]
async fn malformed_body_is_rejected_without_writing() {
    let app = test_app();

    let (status, body) = app
        .send_raw(Method::POST, "/categories", r#"{"name": "Books""#)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = app
        .send(Method::POST, "/categories", Some(json!({ "name": 42 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .send(Method::POST, "/categories", Some(json!({ "name": "" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "name: Name is required");

    assert!(app.db.tables().categories.is_empty());
}

#[tokio::test]
async fn list_without_matches_is_an_empty_array() {
    let app = test_app();

    let (status, body) = app.send(Method::GET, "/categories", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn list_filters_by_product_count_inclusively() {
    let app = test_app();
    let empty = app.create_category("Empty").await;
    let single = app.create_category("Single").await;
    let double = app.create_category("Double").await;
    app.create_product("A", 1.0, Some(single)).await;
    app.create_product("B", 1.0, Some(double)).await;
    app.create_product("C", 1.0, Some(double)).await;

    let (status, body) = app
        .send(Method::GET, "/categories?min_products=1&max_products=2", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Single", "Double"]);

    let (_, body) = app
        .send(Method::GET, "/categories?min_products=0&max_products=0", None)
        .await;
    assert_eq!(body[0]["id"], empty);
    assert_eq!(names(&body), vec!["Empty"]);
}

#[tokio::test]
async fn malformed_count_bounds_are_ignored() {
    let app = test_app();
    app.create_category("Books").await;
    app.create_category("Games").await;

    for query in [
        "/categories?min_products=one&max_products=2",
        "/categories?min_products=1",
        "/categories?max_products=1.5&min_products=0",
    ] {
        let (status, body) = app.send(Method::GET, query, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&body), vec!["Books", "Games"], "{query}");
    }
}

#[tokio::test]
async fn search_matches_substrings_case_insensitively() {
    let app = test_app();
    app.create_category("Science Fiction").await;
    app.create_category("Cookbooks").await;

    let (_, body) = app.send(Method::GET, "/categories?search=FICT", None).await;
    assert_eq!(names(&body), vec!["Science Fiction"]);
}

#[tokio::test]
async fn get_loads_products_of_the_category() {
    let app = test_app();
    let books = app.create_category("Books").await;
    let novel = app.create_product("Novel", 9.99, Some(books)).await;
    app.create_product("Loose", 1.0, None).await;

    let (status, body) = app
        .send(Method::GET, &format!("/categories/{books}"), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Books");
    assert_eq!(
        body["products"],
        json!([{ "id": novel, "name": "Novel", "price": 9.99, "category_id": books }])
    );
}

#[tokio::test]
async fn unknown_or_non_numeric_ids_are_not_found() {
    let app = test_app();

    for uri in ["/categories/999", "/categories/abc"] {
        let (status, body) = app.send(Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, json!({ "error": "Category not found" }));
    }

    let (status, _) = app
        .send(Method::PUT, "/categories/999", Some(json!({ "name": "X" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send(Method::DELETE, "/categories/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_overwrites_present_fields() {
    let app = test_app();
    let id = app.create_category("Boks").await;

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/categories/{id}"),
            Some(json!({ "name": "Books" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Books");

    let (status, body) = app
        .send(Method::PUT, &format!("/categories/{id}"), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Books");

    let (status, _) = app
        .send_raw(Method::PUT, &format!("/categories/{id}"), "name=Books")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.db.tables().categories[0].name, "Books");
}

#[tokio::test]
async fn delete_detaches_products() {
    let app = test_app();
    let books = app.create_category("Books").await;
    let novel = app.create_product("Novel", 9.99, Some(books)).await;

    let (status, body) = app
        .send(Method::DELETE, &format!("/categories/{books}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Category deleted" }));

    let (status, body) = app
        .send(Method::GET, &format!("/products/{novel}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category_id"], json!(null));
    assert_eq!(body["category"], json!(null));
}

#[tokio::test]
async fn storage_failure_on_list_is_internal_error() {
    let app = test_app();
    app.db.fail_reads();

    let (status, body) = app.send(Method::GET, "/categories", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to fetch categories" }));
}

#[tokio::test]
async fn update_of_missing_category_is_not_found_whatever_the_body() {
    let app = test_app();

    let (status, body) = app.send_raw(Method::PUT, "/categories/999", "not json").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Category not found" }));

    let (status, _) = app
        .send(Method::PUT, "/categories/999", Some(json!({ "name": "" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let id = app.create_category("Books").await;
    let (status, _) = app
        .send_raw(Method::PUT, &format!("/categories/{id}"), "not json")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.db.tables().categories[0].name, "Books");
}
