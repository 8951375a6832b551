//! Review service: owns the review entity, keyed by `(product_id, review_id)`,
//! reachable over REST and the "reviews" event topic.

pub mod consumer;
pub mod controllers;
pub mod mapper;
pub mod persistence;
pub mod service;
pub mod state;
