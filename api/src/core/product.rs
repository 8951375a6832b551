use serde::{Deserialize, Serialize};

/// A product as served by the product service.
///
/// `service_address` identifies the instance that answered a read; it is
/// `None` on writes and on event payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: i32,
    pub name: String,
    pub weight: i32,
    #[serde(default)]
    pub service_address: Option<String>,
}

impl Product {
    pub fn new(product_id: i32, name: impl Into<String>, weight: i32) -> Self {
        Self {
            product_id,
            name: name.into(),
            weight,
            service_address: None,
        }
    }

    pub fn with_service_address(mut self, address: impl Into<String>) -> Self {
        self.service_address = Some(address.into());
        self
    }
}
