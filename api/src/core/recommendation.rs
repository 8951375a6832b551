use serde::{Deserialize, Serialize};

/// A recommendation attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub product_id: i32,
    pub recommendation_id: i32,
    pub author: String,
    pub rate: i32,
    pub content: String,
    #[serde(default)]
    pub service_address: Option<String>,
}

impl Recommendation {
    pub fn new(
        product_id: i32,
        recommendation_id: i32,
        author: impl Into<String>,
        rate: i32,
        content: impl Into<String>,
    ) -> Self {
        Self {
            product_id,
            recommendation_id,
            author: author.into(),
            rate,
            content: content.into(),
            service_address: None,
        }
    }

    pub fn with_service_address(mut self, address: impl Into<String>) -> Self {
        self.service_address = Some(address.into());
        self
    }
}
