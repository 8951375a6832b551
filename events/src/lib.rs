//! Message channel plumbing for asynchronous entity propagation.
//!
//! Producers talk to a [`MessagePublisher`]: `publish(topic, key, payload)`,
//! where `payload` is the JSON-serialized event envelope and `key` is the
//! partition key routing all events of one product to the same ordering
//! lane. [`LocalBroker`] is the in-process implementation; tests swap in
//! [`RecordingPublisher`] to assert on what was published.

mod local;
mod recording;

pub use local::{
    LocalBroker, DEFAULT_LANE_CAPACITY, DEFAULT_PARTITIONS, DEFAULT_PUBLISH_POOL_SIZE,
};
pub use recording::RecordingPublisher;

use futures_util::future::BoxFuture;

/// Error returned when a publication cannot be handed to the channel.
#[derive(Debug, Clone)]
pub struct PublishError {
    pub topic: String,
    pub message: String,
}

impl std::fmt::Display for PublishError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "publish to '{}' failed: {}", self.topic, self.message)
    }
}

impl std::error::Error for PublishError {}

/// Producer side of the message channel.
///
/// Dyn-compatible so services can hold an `Arc<dyn MessagePublisher>` and
/// swap the broker for a recording fake in tests.
pub trait MessagePublisher: Send + Sync {
    /// Hand one message to the channel. Completes once the channel has
    /// accepted it; actual consumption happens out-of-band.
    fn publish(
        &self,
        topic: &str,
        key: i32,
        payload: Vec<u8>,
    ) -> BoxFuture<'static, Result<(), PublishError>>;
}
