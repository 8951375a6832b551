//! Product service: owns the product entity and exposes it over two
//! transports (the REST controller and the event consumer), both calling
//! into the same [`service::ProductService`].

pub mod consumer;
pub mod controllers;
pub mod mapper;
pub mod persistence;
pub mod service;
pub mod state;
