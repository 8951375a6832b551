//! In-memory review store, unique on `(product_id, review_id)`.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEntity {
    pub id: Option<String>,
    pub version: Option<i32>,
    pub product_id: i32,
    pub review_id: i32,
    pub author: String,
    pub subject: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy)]
pub struct DuplicateKeyError;

impl std::fmt::Display for DuplicateKeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "duplicate key")
    }
}

impl std::error::Error for DuplicateKeyError {}

#[derive(Clone, Default)]
pub struct ReviewRepository {
    rows: Arc<DashMap<(i32, i32), ReviewEntity>>,
}

impl ReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// All reviews for one product, ordered by review id.
    pub fn find_by_product_id(&self, product_id: i32) -> Vec<ReviewEntity> {
        let mut rows: Vec<ReviewEntity> = self
            .rows
            .iter()
            .filter(|row| row.product_id == product_id)
            .map(|row| row.clone())
            .collect();
        rows.sort_by_key(|row| row.review_id);
        rows
    }

    pub fn save(&self, mut entity: ReviewEntity) -> Result<ReviewEntity, DuplicateKeyError> {
        match self.rows.entry((entity.product_id, entity.review_id)) {
            Entry::Occupied(_) => Err(DuplicateKeyError),
            Entry::Vacant(slot) => {
                entity.id = Some(Uuid::new_v4().to_string());
                entity.version = Some(0);
                slot.insert(entity.clone());
                Ok(entity)
            }
        }
    }

    /// Cascading and idempotent: removes every row of the product.
    pub fn delete_by_product_id(&self, product_id: i32) {
        self.rows.retain(|key, _| key.0 != product_id);
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }
}
