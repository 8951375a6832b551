//! Recommendation service: owns the recommendation entity, keyed by
//! `(product_id, recommendation_id)`, reachable over REST and the
//! "recommendations" event topic.

pub mod consumer;
pub mod controllers;
pub mod mapper;
pub mod persistence;
pub mod service;
pub mod state;
