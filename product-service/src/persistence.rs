//! In-memory product store, unique on `product_id`.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductEntity {
    pub id: Option<String>,
    pub version: Option<i32>,
    pub product_id: i32,
    pub name: String,
    pub weight: i32,
}

/// Insert collided with an existing row on the unique key.
#[derive(Debug, Clone, Copy)]
pub struct DuplicateKeyError;

impl std::fmt::Display for DuplicateKeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "duplicate key")
    }
}

impl std::error::Error for DuplicateKeyError {}

#[derive(Clone, Default)]
pub struct ProductRepository {
    rows: Arc<DashMap<i32, ProductEntity>>,
}

impl ProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_by_product_id(&self, product_id: i32) -> Option<ProductEntity> {
        self.rows.get(&product_id).map(|row| row.clone())
    }

    /// Persist a new row, assigning its storage id and version.
    pub fn save(&self, mut entity: ProductEntity) -> Result<ProductEntity, DuplicateKeyError> {
        match self.rows.entry(entity.product_id) {
            Entry::Occupied(_) => Err(DuplicateKeyError),
            Entry::Vacant(slot) => {
                entity.id = Some(Uuid::new_v4().to_string());
                entity.version = Some(0);
                slot.insert(entity.clone());
                Ok(entity)
            }
        }
    }

    /// Idempotent: removing an absent row is a no-op.
    pub fn delete_by_product_id(&self, product_id: i32) {
        self.rows.remove(&product_id);
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(product_id: i32) -> ProductEntity {
        ProductEntity {
            id: None,
            version: None,
            product_id,
            name: format!("product {product_id}"),
            weight: product_id,
        }
    }

    #[test]
    fn save_assigns_id_and_version() {
        let repository = ProductRepository::new();
        let saved = repository.save(entity(1)).unwrap();
        assert!(saved.id.is_some());
        assert_eq!(saved.version, Some(0));
        assert_eq!(repository.find_by_product_id(1).unwrap(), saved);
    }

    #[test]
    fn duplicate_product_id_is_rejected() {
        let repository = ProductRepository::new();
        repository.save(entity(1)).unwrap();
        assert!(repository.save(entity(1)).is_err());
        assert_eq!(repository.count(), 1);
    }

    #[test]
    fn delete_is_idempotent() {
        let repository = ProductRepository::new();
        repository.save(entity(1)).unwrap();
        repository.delete_by_product_id(1);
        repository.delete_by_product_id(1);
        assert!(repository.find_by_product_id(1).is_none());
    }
}
