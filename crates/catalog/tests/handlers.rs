mod common;

use catalog::{handler::AppRouter, repository::InMemoryCatalog};
use common::{StaticClient, TestServer, in_memory_state, pen_payload};
use reqwest::{Method, StatusCode, header::CONTENT_TYPE};
use serde_json::{Value, json};
use std::sync::Arc;

struct TestApp {
    server: TestServer,
    client: reqwest::Client,
    stationery: i32,
    sellable: i32,
    not_sellable: i32,
}

async fn app() -> TestApp {
    let store = InMemoryCatalog::new();
    let stationery = store.insert_category("Stationery").unwrap();
    store.insert_category("Printer Supplies").unwrap();
    let sellable = store.insert_status("sellable").unwrap();
    let not_sellable = store.insert_status("not sellable").unwrap();

    let state = in_memory_state(&store, Arc::new(StaticClient(pen_payload())));

    TestApp {
        server: TestServer::spawn(AppRouter::build(state)).await,
        client: reqwest::Client::new(),
        stationery,
        sellable,
        not_sellable,
    }
}

impl TestApp {
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = self.client.request(method, self.server.url(path));
        if let Some(json) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(json.to_string());
        }

        let response = request.send().await.unwrap();
        let status = response.status();
        let text = response.text().await.unwrap();
        let value = serde_json::from_str(&text).unwrap_or(Value::Null);

        (status, value)
    }
}

async fn create(app: &TestApp, name: &str, price: i64, status_id: i32) -> i64 {
    let (status, body) = app
        .send(
            Method::POST,
            "/api/products",
            Some(json!({
                "name": name,
                "price": price,
                "category_id": app.stationery,
                "status_id": status_id,
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn create_then_fetch_product() {
    let app = app().await;
    let id = create(&app, "Pen", 5000, app.sellable).await;

    let (status, body) = app.send(Method::GET, &format!("/api/products/{id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["name"], "Pen");
    assert_eq!(body["data"]["price"], "5000.00");
    assert_eq!(body["data"]["category"], "Stationery");
    assert_eq!(body["data"]["status"], "sellable");
}

#[tokio::test]
async fn invalid_product_is_rejected_with_field_messages() {
    let app = app().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/products",
            Some(json!({"name": "Pe", "price": 0, "category_id": app.stationery, "status_id": 0})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Validation failed: "));
    assert!(message.contains("Product name must be at least 3 characters."));
    assert!(message.contains("Price must be greater than 0."));
    assert!(message.contains("Status must be selected."));
    assert!(body["details"]["name"].is_array());
}

#[tokio::test]
async fn price_keeps_cents() {
    let app = app().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/products",
            Some(json!({
                "name": "Gel Pen",
                "price": 5000.5,
                "category_id": app.stationery,
                "status_id": app.sellable,
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["price"], "5000.50");

    let (status, body) = app
        .send(
            Method::POST,
            "/api/products",
            Some(json!({
                "name": "Gel Pen",
                "price": "12.345",
                "category_id": app.stationery,
                "status_id": app.sellable,
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Price can have at most 2 decimal places."));
}

#[tokio::test]
async fn stored_names_are_trimmed_and_match_sync() {
    let app = app().await;
    let id = create(&app, "  Pen  ", 5000, app.sellable).await;

    let (_, body) = app.send(Method::GET, &format!("/api/products/{id}"), None).await;
    assert_eq!(body["data"]["name"], "Pen");

    let (status, body) = app.send(Method::POST, "/api/sync", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["created"], 0);
    assert_eq!(body["data"]["unchanged"], 1);

    let (_, body) = app.send(Method::GET, "/api/products", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_category_is_a_bad_request() {
    let app = app().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/products",
            Some(json!({"name": "Pen", "price": 5000, "category_id": 999, "status_id": app.sellable})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn listing_only_shows_sellable_products() {
    let app = app().await;
    create(&app, "Pen", 5000, app.sellable).await;
    create(&app, "Pencil", 3000, app.sellable).await;
    create(&app, "Stapler", 32000, app.not_sellable).await;

    let (status, body) = app.send(Method::GET, "/api/products", None).await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Pen"));
    assert!(names.contains(&"Pencil"));
    assert!(!names.contains(&"Stapler"));
}

#[tokio::test]
async fn listing_filters_by_search_and_category() {
    let app = app().await;
    create(&app, "Pen", 5000, app.sellable).await;
    create(&app, "Notebook", 12000, app.sellable).await;

    let (_, body) = app.send(Method::GET, "/api/products?search=NOTE", None).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "Notebook");

    let (status, body) = app
        .send(
            Method::GET,
            &format!("/api/products/by-category/{}", app.stationery),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, _) = app.send(Method::GET, "/api/products/by-category/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_and_delete_product() {
    let app = app().await;
    let id = create(&app, "Pen", 5000, app.sellable).await;

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/products/{id}"),
            Some(json!({
                "name": "Gel Pen",
                "price": 6500,
                "category_id": app.stationery,
                "status_id": app.not_sellable,
                "description": "Blue ink"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Gel Pen");
    assert_eq!(body["data"]["price"], "6500.00");
    assert_eq!(body["data"]["status"], "not sellable");
    assert_eq!(body["data"]["description"], "Blue ink");

    let (status, _) = app.send(Method::DELETE, &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.send(Method::GET, &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");

    let (status, _) = app.send(Method::DELETE, &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reference_lists_are_sorted_by_name() {
    let app = app().await;

    let (status, body) = app.send(Method::GET, "/api/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["name"], "Printer Supplies");
    assert_eq!(body["data"][1]["name"], "Stationery");

    let (_, body) = app.send(Method::GET, "/api/statuses", None).await;
    assert_eq!(body["data"][0]["name"], "not sellable");
    assert_eq!(body["data"][1]["name"], "sellable");
}

#[tokio::test]
async fn metrics_are_exposed() {
    let app = app().await;
    app.send(Method::GET, "/api/products", None).await;

    let response = app
        .client
        .get(app.server.url("/metrics"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let text = response.text().await.unwrap();
    assert!(text.contains("product_query_service_request_counter_total"));
    assert!(text.contains("catalog_sync_products_created"));
}
