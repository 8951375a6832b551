//! Explicit mapping between the storage entity and the API DTO.

use api::core::Product;

use crate::persistence::ProductEntity;

/// `service_address` is never mapped from storage; readers populate it.
pub fn entity_to_api(entity: &ProductEntity) -> Product {
    Product {
        product_id: entity.product_id,
        name: entity.name.clone(),
        weight: entity.weight,
        service_address: None,
    }
}

pub fn api_to_entity(product: &Product) -> ProductEntity {
    ProductEntity {
        id: None,
        version: None,
        product_id: product.product_id,
        name: product.name.clone(),
        weight: product.weight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_all_fields_except_service_address() {
        let product = Product::new(1, "product 1", 10).with_service_address("host/ip:7001");
        let entity = api_to_entity(&product);
        assert_eq!(entity.id, None);
        assert_eq!(entity.version, None);

        let back = entity_to_api(&entity);
        assert_eq!(back.product_id, product.product_id);
        assert_eq!(back.name, product.name);
        assert_eq!(back.weight, product.weight);
        assert_eq!(back.service_address, None);
    }
}
