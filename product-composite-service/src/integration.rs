//! Downstream access for the composite: HTTP reads against the three core
//! services, and writes over REST or the message channels depending on the
//! configured delivery mode.

use std::sync::Arc;

use api::core::{Product, Recommendation, Review};
use api::{ApiError, Event};
use events::MessagePublisher;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, warn};
use util::HttpErrorInfo;

use crate::config::{CompositeConfig, DeliveryMode};

const PRODUCTS_TOPIC: &str = "products";
const RECOMMENDATIONS_TOPIC: &str = "recommendations";
const REVIEWS_TOPIC: &str = "reviews";

#[derive(Clone)]
pub struct ProductCompositeIntegration {
    client: reqwest::Client,
    product_url: String,
    recommendation_url: String,
    review_url: String,
    delivery_mode: DeliveryMode,
    publisher: Arc<dyn MessagePublisher>,
}

impl ProductCompositeIntegration {
    pub fn new(
        product_url: impl Into<String>,
        recommendation_url: impl Into<String>,
        review_url: impl Into<String>,
        delivery_mode: DeliveryMode,
        publisher: Arc<dyn MessagePublisher>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            product_url: product_url.into(),
            recommendation_url: recommendation_url.into(),
            review_url: review_url.into(),
            delivery_mode,
            publisher,
        }
    }

    pub fn from_config(config: &CompositeConfig, publisher: Arc<dyn MessagePublisher>) -> Self {
        Self::new(
            config.product.url(),
            config.recommendation.url(),
            config.review.url(),
            config.delivery_mode,
            publisher,
        )
    }

    /// A missing or invalid product fails the whole read with the downstream
    /// error kind; everything else is surfaced as Internal.
    pub async fn get_product(&self, product_id: i32) -> Result<Product, ApiError> {
        let url = format!("{}/product/{product_id}", self.product_url);
        debug!("getProduct: calling {url}");

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!("getProduct: call to {url} failed: {e}");
            ApiError::Internal(format!("Failed to call product service: {e}"))
        })?;

        if response.status().is_success() {
            response
                .json::<Product>()
                .await
                .map_err(|e| ApiError::Internal(format!("Malformed product response: {e}")))
        } else {
            Err(classify(response).await)
        }
    }

    /// Best-effort: any failure is logged and yields an empty list.
    pub async fn get_recommendations(&self, product_id: i32) -> Vec<Recommendation> {
        let url = format!(
            "{}/recommendation?productId={product_id}",
            self.recommendation_url
        );
        self.get_list(&url, "getRecommendations").await
    }

    /// Best-effort: any failure is logged and yields an empty list.
    pub async fn get_reviews(&self, product_id: i32) -> Vec<Review> {
        let url = format!("{}/review?productId={product_id}", self.review_url);
        self.get_list(&url, "getReviews").await
    }

    async fn get_list<T: serde::de::DeserializeOwned>(&self, url: &str, op: &str) -> Vec<T> {
        debug!("{op}: calling {url}");
        match self.client.get(url).send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<Vec<T>>().await {
                    Ok(list) => list,
                    Err(e) => {
                        warn!("{op}: malformed response from {url}, returning zero items: {e}");
                        Vec::new()
                    }
                }
            }
            Ok(response) => {
                warn!(
                    "{op}: got status {} from {url}, returning zero items",
                    response.status()
                );
                Vec::new()
            }
            Err(e) => {
                warn!("{op}: call to {url} failed, returning zero items: {e}");
                Vec::new()
            }
        }
    }

    pub async fn create_product(&self, product: Product) -> Result<(), ApiError> {
        match self.delivery_mode {
            DeliveryMode::Sync => {
                let url = format!("{}/product", self.product_url);
                self.post(&url, &product, "product").await
            }
            DeliveryMode::Messaging => {
                let event = Event::create(product.product_id, product);
                self.publish(PRODUCTS_TOPIC, &event).await
            }
        }
    }

    pub async fn create_recommendation(
        &self,
        recommendation: Recommendation,
    ) -> Result<(), ApiError> {
        match self.delivery_mode {
            DeliveryMode::Sync => {
                let url = format!("{}/recommendation", self.recommendation_url);
                self.post(&url, &recommendation, "recommendation").await
            }
            DeliveryMode::Messaging => {
                let event = Event::create(recommendation.product_id, recommendation);
                self.publish(RECOMMENDATIONS_TOPIC, &event).await
            }
        }
    }

    pub async fn create_review(&self, review: Review) -> Result<(), ApiError> {
        match self.delivery_mode {
            DeliveryMode::Sync => {
                let url = format!("{}/review", self.review_url);
                self.post(&url, &review, "review").await
            }
            DeliveryMode::Messaging => {
                let event = Event::create(review.product_id, review);
                self.publish(REVIEWS_TOPIC, &event).await
            }
        }
    }

    pub async fn delete_product(&self, product_id: i32) -> Result<(), ApiError> {
        match self.delivery_mode {
            DeliveryMode::Sync => {
                let url = format!("{}/product/{product_id}", self.product_url);
                self.delete(&url, "product").await
            }
            DeliveryMode::Messaging => {
                let event: Event<i32, Product> = Event::delete(product_id);
                self.publish(PRODUCTS_TOPIC, &event).await
            }
        }
    }

    pub async fn delete_recommendations(&self, product_id: i32) -> Result<(), ApiError> {
        match self.delivery_mode {
            DeliveryMode::Sync => {
                let url = format!(
                    "{}/recommendation?productId={product_id}",
                    self.recommendation_url
                );
                self.delete(&url, "recommendation").await
            }
            DeliveryMode::Messaging => {
                let event: Event<i32, Recommendation> = Event::delete(product_id);
                self.publish(RECOMMENDATIONS_TOPIC, &event).await
            }
        }
    }

    pub async fn delete_reviews(&self, product_id: i32) -> Result<(), ApiError> {
        match self.delivery_mode {
            DeliveryMode::Sync => {
                let url = format!("{}/review?productId={product_id}", self.review_url);
                self.delete(&url, "review").await
            }
            DeliveryMode::Messaging => {
                let event: Event<i32, Review> = Event::delete(product_id);
                self.publish(REVIEWS_TOPIC, &event).await
            }
        }
    }

    /// One downstream `/health` probe; any failure counts as down.
    pub async fn probe_health(&self, base_url: &str) -> bool {
        self.client
            .get(format!("{base_url}/health"))
            .send()
            .await
            .map(|response| response.status().is_success())
            .unwrap_or(false)
    }

    pub fn product_url(&self) -> &str {
        &self.product_url
    }

    pub fn recommendation_url(&self) -> &str {
        &self.recommendation_url
    }

    pub fn review_url(&self) -> &str {
        &self.review_url
    }

    async fn post<T: Serialize>(&self, url: &str, body: &T, what: &str) -> Result<(), ApiError> {
        debug!("create {what}: calling {url}");
        let response = self.client.post(url).json(body).send().await.map_err(|e| {
            warn!("create {what}: call to {url} failed: {e}");
            ApiError::Internal(format!("Failed to call {what} service: {e}"))
        })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(classify(response).await)
        }
    }

    async fn delete(&self, url: &str, what: &str) -> Result<(), ApiError> {
        debug!("delete {what}: calling {url}");
        let response = self.client.delete(url).send().await.map_err(|e| {
            warn!("delete {what}: call to {url} failed: {e}");
            ApiError::Internal(format!("Failed to call {what} service: {e}"))
        })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(classify(response).await)
        }
    }

    async fn publish<T: Serialize>(
        &self,
        topic: &str,
        event: &Event<i32, T>,
    ) -> Result<(), ApiError> {
        let payload = serde_json::to_vec(event)
            .map_err(|e| ApiError::Internal(format!("Failed to serialize event: {e}")))?;
        self.publisher
            .publish(topic, event.key, payload)
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))
    }
}

/// Reclassify a non-success downstream response. The message comes from the
/// structured error body when it parses, otherwise from the raw body.
async fn classify(response: reqwest::Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<HttpErrorInfo>(&body)
        .map(|info| info.message)
        .unwrap_or_else(|_| body.clone());

    match status {
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        StatusCode::UNPROCESSABLE_ENTITY => ApiError::InvalidInput(message),
        _ => {
            warn!("Got an unexpected downstream status: {status}, body: {body}");
            ApiError::Internal(message)
        }
    }
}
