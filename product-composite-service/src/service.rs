//! The composite capability: aggregate reads and fanned-out writes over the
//! three core services.

use std::sync::Arc;

use api::composite::{
    ProductAggregate, RecommendationSummary, ReviewSummary, ServiceAddresses,
};
use api::core::{Product, Recommendation, Review};
use api::ApiError;
use futures_util::future::{try_join_all, BoxFuture};
use serde::Serialize;
use tracing::debug;
use util::ServiceUtil;

use crate::integration::ProductCompositeIntegration;

/// Up/down state of the three downstream `/health` probes.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownstreamHealth {
    pub product: bool,
    pub recommendation: bool,
    pub review: bool,
}

impl DownstreamHealth {
    pub fn all_up(&self) -> bool {
        self.product && self.recommendation && self.review
    }
}

#[derive(Clone)]
pub struct ProductCompositeService {
    integration: Arc<ProductCompositeIntegration>,
    service_util: Arc<ServiceUtil>,
}

impl ProductCompositeService {
    pub fn new(
        integration: Arc<ProductCompositeIntegration>,
        service_util: Arc<ServiceUtil>,
    ) -> Self {
        Self {
            integration,
            service_util,
        }
    }

    /// Fan out the three reads concurrently. The product is required; the
    /// lists are best-effort and may come back empty.
    pub async fn get_composite(&self, product_id: i32) -> Result<ProductAggregate, ApiError> {
        let (product, recommendations, reviews) = tokio::join!(
            self.integration.get_product(product_id),
            self.integration.get_recommendations(product_id),
            self.integration.get_reviews(product_id),
        );
        let product = product?;

        debug!(
            "getComposite: aggregate found for productId: {product_id} ({} recommendations, {} reviews)",
            recommendations.len(),
            reviews.len()
        );
        Ok(self.assemble(product, recommendations, reviews))
    }

    /// One product create plus one create per recommendation and review, all
    /// concurrent. Completes only when every sub-create has completed; the
    /// first failure propagates.
    pub async fn create_composite(&self, aggregate: &ProductAggregate) -> Result<(), ApiError> {
        debug!(
            "createComposite: creates a new composite entity for productId: {}",
            aggregate.product_id
        );

        let mut ops: Vec<BoxFuture<'_, Result<(), ApiError>>> = Vec::new();

        let product = Product::new(aggregate.product_id, &aggregate.name, aggregate.weight);
        ops.push(Box::pin(self.integration.create_product(product)));

        for summary in &aggregate.recommendations {
            let recommendation = Recommendation::new(
                aggregate.product_id,
                summary.recommendation_id,
                &summary.author,
                summary.rate,
                &summary.content,
            );
            ops.push(Box::pin(self.integration.create_recommendation(recommendation)));
        }

        for summary in &aggregate.reviews {
            let review = Review::new(
                aggregate.product_id,
                summary.review_id,
                &summary.author,
                &summary.subject,
                &summary.content,
            );
            ops.push(Box::pin(self.integration.create_review(review)));
        }

        try_join_all(ops).await?;
        Ok(())
    }

    /// Three concurrent deletes; idempotent end-to-end because each core
    /// service treats delete as a no-op for unknown ids.
    pub async fn delete_composite(&self, product_id: i32) -> Result<(), ApiError> {
        debug!("deleteComposite: deletes the composite entity for productId: {product_id}");
        tokio::try_join!(
            self.integration.delete_product(product_id),
            self.integration.delete_recommendations(product_id),
            self.integration.delete_reviews(product_id),
        )?;
        Ok(())
    }

    pub async fn downstream_health(&self) -> DownstreamHealth {
        let (product, recommendation, review) = tokio::join!(
            self.integration.probe_health(self.integration.product_url()),
            self.integration
                .probe_health(self.integration.recommendation_url()),
            self.integration.probe_health(self.integration.review_url()),
        );
        DownstreamHealth {
            product,
            recommendation,
            review,
        }
    }

    fn assemble(
        &self,
        product: Product,
        recommendations: Vec<Recommendation>,
        reviews: Vec<Review>,
    ) -> ProductAggregate {
        let service_addresses = ServiceAddresses {
            composite_address: self.service_util.address().to_string(),
            product_address: product.service_address.clone().unwrap_or_default(),
            review_address: reviews
                .first()
                .and_then(|review| review.service_address.clone())
                .unwrap_or_default(),
            recommendation_address: recommendations
                .first()
                .and_then(|recommendation| recommendation.service_address.clone())
                .unwrap_or_default(),
        };

        ProductAggregate {
            product_id: product.product_id,
            name: product.name,
            weight: product.weight,
            recommendations: recommendations
                .into_iter()
                .map(|r| RecommendationSummary {
                    recommendation_id: r.recommendation_id,
                    author: r.author,
                    rate: r.rate,
                    content: r.content,
                })
                .collect(),
            reviews: reviews
                .into_iter()
                .map(|r| ReviewSummary {
                    review_id: r.review_id,
                    author: r.author,
                    subject: r.subject,
                    content: r.content,
                })
                .collect(),
            service_addresses: Some(service_addresses),
        }
    }
}
