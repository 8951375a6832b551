//! The recommendation capability: create, list by product, delete by product.
//! Called from both the REST controller and the event consumer.

use std::sync::Arc;

use api::core::Recommendation;
use api::ApiError;
use tracing::debug;
use util::ServiceUtil;

use crate::mapper;
use crate::persistence::RecommendationRepository;

#[derive(Clone)]
pub struct RecommendationService {
    repository: RecommendationRepository,
    service_util: Arc<ServiceUtil>,
}

impl RecommendationService {
    pub fn new(repository: RecommendationRepository, service_util: Arc<ServiceUtil>) -> Self {
        Self {
            repository,
            service_util,
        }
    }

    /// An unknown product is not an error here; it just has no recommendations.
    pub fn get_recommendations(&self, product_id: i32) -> Result<Vec<Recommendation>, ApiError> {
        if product_id < 1 {
            return Err(ApiError::InvalidInput(format!(
                "Invalid productId: {product_id}"
            )));
        }

        let recommendations: Vec<Recommendation> = self
            .repository
            .find_by_product_id(product_id)
            .iter()
            .map(|entity| {
                mapper::entity_to_api(entity).with_service_address(self.service_util.address())
            })
            .collect();
        debug!(
            "getRecommendations: response size: {} for productId: {product_id}",
            recommendations.len()
        );

        Ok(recommendations)
    }

    pub fn create_recommendation(
        &self,
        recommendation: &Recommendation,
    ) -> Result<Recommendation, ApiError> {
        if recommendation.product_id < 1 {
            return Err(ApiError::InvalidInput(format!(
                "Invalid productId: {}",
                recommendation.product_id
            )));
        }

        let entity = mapper::api_to_entity(recommendation);
        let saved = self.repository.save(entity).map_err(|_| {
            ApiError::InvalidInput(format!(
                "Duplicate key, Product id: {}, Recommendation id: {}",
                recommendation.product_id, recommendation.recommendation_id
            ))
        })?;
        debug!(
            "createRecommendation: entity created for productId: {}",
            recommendation.product_id
        );

        Ok(mapper::entity_to_api(&saved).with_service_address(self.service_util.address()))
    }

    /// Idempotent: removes every recommendation of the product, if any.
    pub fn delete_recommendations(&self, product_id: i32) {
        debug!(
            "deleteRecommendations: tries to delete recommendations for productId: {product_id}"
        );
        self.repository.delete_by_product_id(product_id);
    }
}
