//! Product composite service: the aggregating edge of the system. Reads fan
//! out to the three core services over HTTP; writes go either straight to
//! their REST endpoints or onto the message channels, per configuration.

pub mod config;
pub mod controllers;
pub mod integration;
pub mod service;
pub mod state;
