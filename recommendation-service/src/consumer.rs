//! Event transport for the recommendation capability: applies CREATE/DELETE
//! envelopes from the "recommendations" topic with the same validation as REST.

use api::core::Recommendation;
use api::{ApiError, Event, EventType};
use events::LocalBroker;
use tracing::{info, warn};

use crate::service::RecommendationService;

pub const TOPIC: &str = "recommendations";

/// Apply one message. An error is fatal to that message only; the caller
/// logs and discards it.
pub fn handle_message(service: &RecommendationService, payload: &[u8]) -> Result<(), ApiError> {
    let event: Event<i32, Recommendation> = serde_json::from_slice(payload)
        .map_err(|e| ApiError::EventProcessing(format!("Malformed event payload: {e}")))?;

    info!("Process message created at {}...", event.event_created_at);

    match event.event_type {
        EventType::Create => {
            let recommendation = event.data.ok_or_else(|| {
                ApiError::EventProcessing("Missing data in CREATE event".to_string())
            })?;
            info!(
                "Create recommendation with ID: {}/{}",
                recommendation.product_id, recommendation.recommendation_id
            );
            service.create_recommendation(&recommendation)?;
            Ok(())
        }
        EventType::Delete => {
            info!("Delete recommendations with productId: {}", event.key);
            service.delete_recommendations(event.key);
            Ok(())
        }
    }
}

/// Wire the consumer to the broker's "recommendations" topic.
pub async fn subscribe(broker: &LocalBroker, service: RecommendationService) {
    broker
        .subscribe(TOPIC, move |payload| {
            let service = service.clone();
            async move {
                if let Err(err) = handle_message(&service, &payload) {
                    warn!("Discarding recommendation event: {err}");
                }
            }
        })
        .await;
}
