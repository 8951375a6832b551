use dashmap::DashMap;
use futures_util::future::BoxFuture;
use std::sync::Arc;

use crate::{MessagePublisher, PublishError};

/// Test fake that records every publication instead of delivering it.
///
/// Plays the role a test output-destination binding plays against a real
/// broker: tests publish through the normal production path, then assert on
/// the captured `(key, payload)` pairs per topic.
#[derive(Clone, Default)]
pub struct RecordingPublisher {
    messages: Arc<DashMap<String, Vec<(i32, Vec<u8>)>>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages captured for `topic`, in publication order.
    pub fn messages(&self, topic: &str) -> Vec<(i32, Vec<u8>)> {
        self.messages
            .get(topic)
            .map(|entry| entry.clone())
            .unwrap_or_default()
    }

    pub fn message_count(&self, topic: &str) -> usize {
        self.messages.get(topic).map(|entry| entry.len()).unwrap_or(0)
    }

    /// Drop everything captured for `topic`.
    pub fn purge(&self, topic: &str) {
        self.messages.remove(topic);
    }
}

impl MessagePublisher for RecordingPublisher {
    fn publish(
        &self,
        topic: &str,
        key: i32,
        payload: Vec<u8>,
    ) -> BoxFuture<'static, Result<(), PublishError>> {
        self.messages
            .entry(topic.to_string())
            .or_default()
            .push((key, payload));
        Box::pin(async { Ok(()) })
    }
}
