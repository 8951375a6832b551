//! Explicit mapping between the storage entity and the API DTO. The stored
//! `rating` column surfaces as `rate` in the API.

use api::core::Recommendation;

use crate::persistence::RecommendationEntity;

/// `service_address` is never mapped from storage; readers populate it.
pub fn entity_to_api(entity: &RecommendationEntity) -> Recommendation {
    Recommendation {
        product_id: entity.product_id,
        recommendation_id: entity.recommendation_id,
        author: entity.author.clone(),
        rate: entity.rating,
        content: entity.content.clone(),
        service_address: None,
    }
}

pub fn api_to_entity(recommendation: &Recommendation) -> RecommendationEntity {
    RecommendationEntity {
        id: None,
        version: None,
        product_id: recommendation.product_id,
        recommendation_id: recommendation.recommendation_id,
        author: recommendation.author.clone(),
        rating: recommendation.rate,
        content: recommendation.content.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_and_rating_are_the_same_field() {
        let recommendation = Recommendation::new(1, 2, "author", 4, "content");
        let entity = api_to_entity(&recommendation);
        assert_eq!(entity.rating, 4);
        assert_eq!(entity.id, None);
        assert_eq!(entity.version, None);

        let back = entity_to_api(&entity);
        assert_eq!(back.rate, 4);
        assert_eq!(back.service_address, None);
    }
}
