//! The review capability: create, list by product, delete by product.
//! Called from both the REST controller and the event consumer.

use std::sync::Arc;

use api::core::Review;
use api::ApiError;
use tracing::debug;
use util::ServiceUtil;

use crate::mapper;
use crate::persistence::ReviewRepository;

#[derive(Clone)]
pub struct ReviewService {
    repository: ReviewRepository,
    service_util: Arc<ServiceUtil>,
}

impl ReviewService {
    pub fn new(repository: ReviewRepository, service_util: Arc<ServiceUtil>) -> Self {
        Self {
            repository,
            service_util,
        }
    }

    /// An unknown product is not an error here; it just has no reviews.
    pub fn get_reviews(&self, product_id: i32) -> Result<Vec<Review>, ApiError> {
        if product_id < 1 {
            return Err(ApiError::InvalidInput(format!(
                "Invalid productId: {product_id}"
            )));
        }

        let reviews: Vec<Review> = self
            .repository
            .find_by_product_id(product_id)
            .iter()
            .map(|entity| {
                mapper::entity_to_api(entity).with_service_address(self.service_util.address())
            })
            .collect();
        debug!(
            "getReviews: response size: {} for productId: {product_id}",
            reviews.len()
        );

        Ok(reviews)
    }

    pub fn create_review(&self, review: &Review) -> Result<Review, ApiError> {
        if review.product_id < 1 {
            return Err(ApiError::InvalidInput(format!(
                "Invalid productId: {}",
                review.product_id
            )));
        }

        let entity = mapper::api_to_entity(review);
        let saved = self.repository.save(entity).map_err(|_| {
            ApiError::InvalidInput(format!(
                "Duplicate key, Product id: {}, Review id: {}",
                review.product_id, review.review_id
            ))
        })?;
        debug!("createReview: entity created for productId: {}", review.product_id);

        Ok(mapper::entity_to_api(&saved).with_service_address(self.service_util.address()))
    }

    /// Idempotent: removes every review of the product, if any.
    pub fn delete_reviews(&self, product_id: i32) {
        debug!("deleteReviews: tries to delete reviews for productId: {product_id}");
        self.repository.delete_by_product_id(product_id);
    }
}
