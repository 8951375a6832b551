use std::sync::Arc;

use api::core::Product;
use api::{ApiError, Event};
use product_service::persistence::ProductRepository;
use product_service::service::ProductService;
use product_service::state::AppState;
use product_service::{consumer, controllers};
use testkit::TestApp;
use util::{HttpErrorInfo, ServiceUtil};

fn setup() -> (TestApp, ProductService) {
    let service = ProductService::new(ProductRepository::new(), Arc::new(ServiceUtil::new(7001)));
    let app = TestApp::new(controllers::router(AppState::new(service.clone())));
    (app, service)
}

#[tokio::test]
async fn create_then_get_product() {
    let (app, _) = setup();

    let created: Product = app
        .post("/product")
        .json(&Product::new(1, "product 1", 123))
        .send()
        .await
        .assert_ok()
        .json();
    assert_eq!(created.product_id, 1);
    assert!(created.service_address.is_some());

    let fetched: Product = app.get("/product/1").send().await.assert_ok().json();
    assert_eq!(fetched.name, "product 1");
    assert_eq!(fetched.weight, 123);
    assert!(fetched.service_address.is_some());
}

#[tokio::test]
async fn get_unknown_product_returns_404_with_error_body() {
    let (app, _) = setup();

    let body: HttpErrorInfo = app.get("/product/13").send().await.assert_not_found().json();
    assert_eq!(body.status, 404);
    assert_eq!(body.error, "Not Found");
    assert_eq!(body.path, "/product/13");
    assert_eq!(body.message, "No product found for productId: 13");
}

#[tokio::test]
async fn get_invalid_product_id_returns_422() {
    let (app, _) = setup();

    let body: HttpErrorInfo = app
        .get("/product/-1")
        .send()
        .await
        .assert_unprocessable()
        .json();
    assert_eq!(body.message, "Invalid productId: -1");
}

#[tokio::test]
async fn duplicate_create_returns_422() {
    let (app, _) = setup();

    app.post("/product")
        .json(&Product::new(1, "product 1", 1))
        .send()
        .await
        .assert_ok();

    let body: HttpErrorInfo = app
        .post("/product")
        .json(&Product::new(1, "another name", 2))
        .send()
        .await
        .assert_unprocessable()
        .json();
    assert_eq!(body.message, "Duplicate key, Product id: 1");
}

#[tokio::test]
async fn delete_is_idempotent() {
    let (app, _) = setup();

    app.post("/product")
        .json(&Product::new(1, "product 1", 1))
        .send()
        .await
        .assert_ok();

    app.delete("/product/1").send().await.assert_ok();
    app.delete("/product/1").send().await.assert_ok();
    app.get("/product/1").send().await.assert_not_found();
}

#[tokio::test]
async fn health_endpoint_is_up() {
    let (app, _) = setup();
    let resp = app.get("/health").send().await.assert_ok();
    assert_eq!(resp.text(), "OK");
}

#[tokio::test]
async fn consumer_applies_create_and_delete_events() {
    let (app, service) = setup();

    let create = Event::create(1, Product::new(1, "from event", 5));
    consumer::handle_message(&service, &serde_json::to_vec(&create).unwrap()).unwrap();

    let fetched: Product = app.get("/product/1").send().await.assert_ok().json();
    assert_eq!(fetched.name, "from event");

    let delete: Event<i32, Product> = Event::delete(1);
    consumer::handle_message(&service, &serde_json::to_vec(&delete).unwrap()).unwrap();
    app.get("/product/1").send().await.assert_not_found();

    // Deleting again is a silent no-op.
    let delete: Event<i32, Product> = Event::delete(1);
    consumer::handle_message(&service, &serde_json::to_vec(&delete).unwrap()).unwrap();
}

#[tokio::test]
async fn consumer_rejects_malformed_payloads() {
    let (_, service) = setup();

    let err = consumer::handle_message(&service, b"not json").unwrap_err();
    assert!(matches!(err, ApiError::EventProcessing(_)));

    // CREATE without data cannot be applied either.
    let mut create = Event::create(1, Product::new(1, "p", 1));
    create.data = None;
    let err =
        consumer::handle_message(&service, &serde_json::to_vec(&create).unwrap()).unwrap_err();
    assert!(matches!(err, ApiError::EventProcessing(_)));
}
