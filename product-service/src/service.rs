//! The product capability: create, get, delete. Called from both the REST
//! controller and the event consumer.

use std::sync::Arc;

use api::core::Product;
use api::ApiError;
use tracing::debug;
use util::ServiceUtil;

use crate::mapper;
use crate::persistence::ProductRepository;

#[derive(Clone)]
pub struct ProductService {
    repository: ProductRepository,
    service_util: Arc<ServiceUtil>,
}

impl ProductService {
    pub fn new(repository: ProductRepository, service_util: Arc<ServiceUtil>) -> Self {
        Self {
            repository,
            service_util,
        }
    }

    pub fn get_product(&self, product_id: i32) -> Result<Product, ApiError> {
        if product_id < 1 {
            return Err(ApiError::InvalidInput(format!(
                "Invalid productId: {product_id}"
            )));
        }

        let entity = self.repository.find_by_product_id(product_id).ok_or_else(|| {
            ApiError::NotFound(format!("No product found for productId: {product_id}"))
        })?;

        Ok(mapper::entity_to_api(&entity).with_service_address(self.service_util.address()))
    }

    pub fn create_product(&self, product: &Product) -> Result<Product, ApiError> {
        if product.product_id < 1 {
            return Err(ApiError::InvalidInput(format!(
                "Invalid productId: {}",
                product.product_id
            )));
        }

        let entity = mapper::api_to_entity(product);
        let saved = self.repository.save(entity).map_err(|_| {
            ApiError::InvalidInput(format!("Duplicate key, Product id: {}", product.product_id))
        })?;
        debug!("createProduct: entity created for productId: {}", product.product_id);

        Ok(mapper::entity_to_api(&saved).with_service_address(self.service_util.address()))
    }

    /// Idempotent: deleting a nonexistent product is not an error.
    pub fn delete_product(&self, product_id: i32) {
        debug!("deleteProduct: tries to delete entity with productId: {product_id}");
        self.repository.delete_by_product_id(product_id);
    }
}
