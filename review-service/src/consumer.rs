//! Event transport for the review capability: applies CREATE/DELETE envelopes
//! from the "reviews" topic with the same validation as REST.

use api::core::Review;
use api::{ApiError, Event, EventType};
use events::LocalBroker;
use tracing::{info, warn};

use crate::service::ReviewService;

pub const TOPIC: &str = "reviews";

/// Apply one message. An error is fatal to that message only; the caller
/// logs and discards it.
pub fn handle_message(service: &ReviewService, payload: &[u8]) -> Result<(), ApiError> {
    let event: Event<i32, Review> = serde_json::from_slice(payload)
        .map_err(|e| ApiError::EventProcessing(format!("Malformed event payload: {e}")))?;

    info!("Process message created at {}...", event.event_created_at);

    match event.event_type {
        EventType::Create => {
            let review = event.data.ok_or_else(|| {
                ApiError::EventProcessing("Missing data in CREATE event".to_string())
            })?;
            info!(
                "Create review with ID: {}/{}",
                review.product_id, review.review_id
            );
            service.create_review(&review)?;
            Ok(())
        }
        EventType::Delete => {
            info!("Delete reviews with productId: {}", event.key);
            service.delete_reviews(event.key);
            Ok(())
        }
    }
}

/// Wire the consumer to the broker's "reviews" topic.
pub async fn subscribe(broker: &LocalBroker, service: ReviewService) {
    broker
        .subscribe(TOPIC, move |payload| {
            let service = service.clone();
            async move {
                if let Err(err) = handle_message(&service, &payload) {
                    warn!("Discarding review event: {err}");
                }
            }
        })
        .await;
}
