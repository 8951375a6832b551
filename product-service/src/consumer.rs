//! Event transport for the product capability: applies CREATE/DELETE
//! envelopes from the "products" topic with the same validation as REST.

use api::core::Product;
use api::{ApiError, Event, EventType};
use events::LocalBroker;
use tracing::{info, warn};

use crate::service::ProductService;

pub const TOPIC: &str = "products";

/// Apply one message. An error is fatal to that message only; the caller
/// logs and discards it.
pub fn handle_message(service: &ProductService, payload: &[u8]) -> Result<(), ApiError> {
    let event: Event<i32, Product> = serde_json::from_slice(payload)
        .map_err(|e| ApiError::EventProcessing(format!("Malformed event payload: {e}")))?;

    info!("Process message created at {}...", event.event_created_at);

    match event.event_type {
        EventType::Create => {
            let product = event.data.ok_or_else(|| {
                ApiError::EventProcessing("Missing data in CREATE event".to_string())
            })?;
            info!("Create product with ID: {}", product.product_id);
            service.create_product(&product)?;
            Ok(())
        }
        EventType::Delete => {
            info!("Delete product with ID: {}", event.key);
            service.delete_product(event.key);
            Ok(())
        }
    }
}

/// Wire the consumer to the broker's "products" topic.
pub async fn subscribe(broker: &LocalBroker, service: ProductService) {
    broker
        .subscribe(TOPIC, move |payload| {
            let service = service.clone();
            async move {
                if let Err(err) = handle_message(&service, &payload) {
                    warn!("Discarding product event: {err}");
                }
            }
        })
        .await;
}
