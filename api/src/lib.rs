//! Shared API surface of the product composite system.
//!
//! Holds the DTOs exchanged between the services, the event envelope used on
//! the message channels, and the error taxonomy every service maps onto HTTP
//! status codes. Nothing in here talks to the network itself.

pub mod composite;
pub mod core;
pub mod error;
pub mod event;

pub use error::ApiError;
pub use event::{Event, EventType};
