//! DTOs owned by the three leaf services.

pub mod product;
pub mod recommendation;
pub mod review;

pub use product::Product;
pub use recommendation::Recommendation;
pub use review::Review;
