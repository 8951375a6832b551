//! Write-path tests with the messaging delivery mode: every composite write
//! becomes CREATE/DELETE envelopes captured by a recording publisher.

use std::sync::Arc;

use api::composite::{ProductAggregate, RecommendationSummary, ReviewSummary};
use api::core::{Product, Recommendation, Review};
use api::Event;
use events::{MessagePublisher, RecordingPublisher};
use product_composite_service::config::DeliveryMode;
use product_composite_service::controllers;
use product_composite_service::integration::ProductCompositeIntegration;
use product_composite_service::service::ProductCompositeService;
use product_composite_service::state::AppState;
use testkit::TestApp;
use util::ServiceUtil;

fn setup() -> (TestApp, RecordingPublisher) {
    let publisher = RecordingPublisher::new();
    // Downstream URLs are never called in messaging mode.
    let integration = Arc::new(ProductCompositeIntegration::new(
        "http://127.0.0.1:1",
        "http://127.0.0.1:1",
        "http://127.0.0.1:1",
        DeliveryMode::Messaging,
        Arc::new(publisher.clone()) as Arc<dyn MessagePublisher>,
    ));
    let service = ProductCompositeService::new(integration, Arc::new(ServiceUtil::new(7000)));
    let app = TestApp::new(controllers::router(AppState::new(service)));
    (app, publisher)
}

fn aggregate(product_id: i32) -> ProductAggregate {
    ProductAggregate {
        product_id,
        name: format!("product {product_id}"),
        weight: 10,
        recommendations: (1..=3)
            .map(|id| RecommendationSummary {
                recommendation_id: id,
                author: format!("author {id}"),
                rate: id,
                content: "content".to_string(),
            })
            .collect(),
        reviews: (1..=2)
            .map(|id| ReviewSummary {
                review_id: id,
                author: format!("author {id}"),
                subject: "subject".to_string(),
                content: "content".to_string(),
            })
            .collect(),
        service_addresses: None,
    }
}

#[tokio::test]
async fn create_publishes_one_event_per_entity() {
    let (app, publisher) = setup();

    app.post("/product-composite")
        .json(&aggregate(1))
        .send()
        .await
        .assert_accepted();

    assert_eq!(publisher.message_count("products"), 1);
    assert_eq!(publisher.message_count("recommendations"), 3);
    assert_eq!(publisher.message_count("reviews"), 2);

    let (key, payload) = publisher.messages("products")[0].clone();
    assert_eq!(key, 1);
    let event: Event<i32, Product> = serde_json::from_slice(&payload).unwrap();
    assert_eq!(event, Event::create(1, Product::new(1, "product 1", 10)));

    for (key, payload) in publisher.messages("recommendations") {
        assert_eq!(key, 1);
        let event: Event<i32, Recommendation> = serde_json::from_slice(&payload).unwrap();
        let recommendation = event.data.unwrap();
        assert_eq!(recommendation.product_id, 1);
        assert_eq!(recommendation.rate, recommendation.recommendation_id);
    }

    for (key, payload) in publisher.messages("reviews") {
        assert_eq!(key, 1);
        let event: Event<i32, Review> = serde_json::from_slice(&payload).unwrap();
        assert_eq!(event.data.unwrap().subject, "subject");
    }
}

#[tokio::test]
async fn create_without_lists_publishes_only_the_product_event() {
    let (app, publisher) = setup();

    let mut minimal = aggregate(2);
    minimal.recommendations.clear();
    minimal.reviews.clear();

    app.post("/product-composite")
        .json(&minimal)
        .send()
        .await
        .assert_accepted();

    assert_eq!(publisher.message_count("products"), 1);
    assert_eq!(publisher.message_count("recommendations"), 0);
    assert_eq!(publisher.message_count("reviews"), 0);
}

#[tokio::test]
async fn delete_publishes_one_delete_event_per_topic() {
    let (app, publisher) = setup();

    app.delete("/product-composite/1").send().await.assert_accepted();

    for topic in ["products", "recommendations", "reviews"] {
        assert_eq!(publisher.message_count(topic), 1, "topic {topic}");
    }

    let (key, payload) = publisher.messages("products")[0].clone();
    assert_eq!(key, 1);
    let event: Event<i32, Product> = serde_json::from_slice(&payload).unwrap();
    assert_eq!(event, Event::delete(1));
    assert!(event.data.is_none());
}

#[tokio::test]
async fn delete_is_idempotent_end_to_end() {
    let (app, publisher) = setup();

    app.delete("/product-composite/1").send().await.assert_accepted();
    app.delete("/product-composite/1").send().await.assert_accepted();

    // Each call republishes; the core services treat unknown ids as no-ops.
    for topic in ["products", "recommendations", "reviews"] {
        assert_eq!(publisher.message_count(topic), 2, "topic {topic}");
    }
}
