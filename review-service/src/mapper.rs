//! Explicit mapping between the storage entity and the API DTO.

use api::core::Review;

use crate::persistence::ReviewEntity;

/// `service_address` is never mapped from storage; readers populate it.
pub fn entity_to_api(entity: &ReviewEntity) -> Review {
    Review {
        product_id: entity.product_id,
        review_id: entity.review_id,
        author: entity.author.clone(),
        subject: entity.subject.clone(),
        content: entity.content.clone(),
        service_address: None,
    }
}

pub fn api_to_entity(review: &Review) -> ReviewEntity {
    ReviewEntity {
        id: None,
        version: None,
        product_id: review.product_id,
        review_id: review.review_id,
        author: review.author.clone(),
        subject: review.subject.clone(),
        content: review.content.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_all_fields_except_service_address() {
        let review = Review::new(1, 2, "author", "subject", "content")
            .with_service_address("host/ip:7003");
        let entity = api_to_entity(&review);
        assert_eq!(entity.id, None);

        let back = entity_to_api(&entity);
        assert_eq!(back.review_id, review.review_id);
        assert_eq!(back.subject, review.subject);
        assert_eq!(back.service_address, None);
    }
}
