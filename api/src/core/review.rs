use serde::{Deserialize, Serialize};

/// A review attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub product_id: i32,
    pub review_id: i32,
    pub author: String,
    pub subject: String,
    pub content: String,
    #[serde(default)]
    pub service_address: Option<String>,
}

impl Review {
    pub fn new(
        product_id: i32,
        review_id: i32,
        author: impl Into<String>,
        subject: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            product_id,
            review_id,
            author: author.into(),
            subject: subject.into(),
            content: content.into(),
            service_address: None,
        }
    }

    pub fn with_service_address(mut self, address: impl Into<String>) -> Self {
        self.service_address = Some(address.into());
        self
    }
}
