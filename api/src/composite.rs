//! Read model served by the product composite service.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSummary {
    pub recommendation_id: i32,
    pub author: String,
    pub rate: i32,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub review_id: i32,
    pub author: String,
    pub subject: String,
    pub content: String,
}

/// Which physical instance answered each sub-call of a composite read.
///
/// The review/recommendation addresses come from the first element of the
/// respective list, or an empty string when the list is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAddresses {
    pub composite_address: String,
    pub product_address: String,
    pub review_address: String,
    pub recommendation_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAggregate {
    pub product_id: i32,
    pub name: String,
    pub weight: i32,
    #[serde(default)]
    pub recommendations: Vec<RecommendationSummary>,
    #[serde(default)]
    pub reviews: Vec<ReviewSummary>,
    #[serde(default)]
    pub service_addresses: Option<ServiceAddresses>,
}
