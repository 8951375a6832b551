use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use tokio::sync::{mpsc, RwLock, Semaphore};
use tracing::debug;

use crate::{MessagePublisher, PublishError};

type SubscriberFn = Arc<dyn Fn(Vec<u8>) -> BoxFuture<'static, ()> + Send + Sync>;
type Subscribers = Arc<RwLock<Vec<SubscriberFn>>>;

/// Default number of partitions per topic.
pub const DEFAULT_PARTITIONS: usize = 2;
/// Default bound on concurrently executing publish calls.
pub const DEFAULT_PUBLISH_POOL_SIZE: usize = 16;
/// Default per-partition queue depth.
pub const DEFAULT_LANE_CAPACITY: usize = 64;

struct Topic {
    lanes: Vec<mpsc::Sender<(i32, Vec<u8>)>>,
    subscribers: Subscribers,
}

/// In-process message broker with partitioned, ordered delivery.
///
/// Each topic is split into `partitions` lanes; a message with key `k` lands
/// on lane `k % partitions`, and each lane is drained by a single task that
/// runs every subscriber sequentially, so events for one product are always
/// applied in publication order.
///
/// Publication is bounded two ways: a semaphore limits how many `publish`
/// calls execute at once (the publish worker pool), and each lane is a
/// bounded channel (the task queue). When both are exhausted, `publish`
/// waits instead of growing memory.
///
/// `LocalBroker` is `Clone` and can be shared across tasks.
#[derive(Clone)]
pub struct LocalBroker {
    partitions: usize,
    lane_capacity: usize,
    publish_permits: Arc<Semaphore>,
    topics: Arc<RwLock<HashMap<String, Arc<Topic>>>>,
}

impl LocalBroker {
    pub fn new(partitions: usize, publish_pool_size: usize, lane_capacity: usize) -> Self {
        Self {
            partitions: partitions.max(1),
            lane_capacity: lane_capacity.max(1),
            publish_permits: Arc::new(Semaphore::new(publish_pool_size.max(1))),
            topics: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a handler for every message on `topic`, across all lanes.
    pub async fn subscribe<F, Fut>(&self, topic: &str, handler: F)
    where
        F: Fn(Vec<u8>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let topic = self.topic(topic).await;
        let handler: SubscriberFn = Arc::new(move |payload| Box::pin(handler(payload)));
        topic.subscribers.write().await.push(handler);
    }

    async fn do_publish(&self, topic: &str, key: i32, payload: Vec<u8>) -> Result<(), PublishError> {
        let permit = self
            .publish_permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| PublishError {
                topic: topic.to_string(),
                message: "publish pool closed".to_string(),
            })?;

        let handle = self.topic(topic).await;
        let lane = key.rem_euclid(self.partitions as i32) as usize;
        debug!("publishing to topic '{topic}' lane {lane} (key {key})");
        let result = handle.lanes[lane]
            .send((key, payload))
            .await
            .map_err(|_| PublishError {
                topic: topic.to_string(),
                message: format!("lane {lane} closed"),
            });
        drop(permit);
        result
    }

    /// Get or lazily create the topic, spawning one drain task per lane.
    async fn topic(&self, name: &str) -> Arc<Topic> {
        if let Some(topic) = self.topics.read().await.get(name) {
            return topic.clone();
        }

        let mut topics = self.topics.write().await;
        // Lost the race between the read and write lock?
        if let Some(topic) = topics.get(name) {
            return topic.clone();
        }

        let subscribers: Subscribers = Arc::new(RwLock::new(Vec::new()));
        let mut lanes = Vec::with_capacity(self.partitions);
        for _ in 0..self.partitions {
            let (tx, mut rx) = mpsc::channel::<(i32, Vec<u8>)>(self.lane_capacity);
            let subs = subscribers.clone();
            tokio::spawn(async move {
                while let Some((_key, payload)) = rx.recv().await {
                    let handlers: Vec<SubscriberFn> = subs.read().await.clone();
                    for handler in handlers {
                        handler(payload.clone()).await;
                    }
                }
            });
            lanes.push(tx);
        }

        let topic = Arc::new(Topic { lanes, subscribers });
        topics.insert(name.to_string(), topic.clone());
        topic
    }
}

impl Default for LocalBroker {
    fn default() -> Self {
        Self::new(
            DEFAULT_PARTITIONS,
            DEFAULT_PUBLISH_POOL_SIZE,
            DEFAULT_LANE_CAPACITY,
        )
    }
}

impl MessagePublisher for LocalBroker {
    fn publish(
        &self,
        topic: &str,
        key: i32,
        payload: Vec<u8>,
    ) -> BoxFuture<'static, Result<(), PublishError>> {
        let broker = self.clone();
        let topic = topic.to_string();
        Box::pin(async move { broker.do_publish(&topic, key, payload).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Mutex;

    async fn wait_until(deadline_ms: u64, mut done: impl FnMut() -> bool) {
        let mut waited = 0;
        while !done() {
            assert!(waited < deadline_ms, "condition not met within {deadline_ms}ms");
            tokio::time::sleep(Duration::from_millis(10)).await;
            waited += 10;
        }
    }

    #[tokio::test]
    async fn same_key_messages_arrive_in_publication_order() {
        let broker = LocalBroker::new(4, 8, 16);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let count = Arc::new(AtomicUsize::new(0));

        let s = seen.clone();
        let c = count.clone();
        broker
            .subscribe("products", move |payload| {
                let s = s.clone();
                let c = c.clone();
                async move {
                    s.lock().await.push(payload);
                    c.fetch_add(1, Ordering::SeqCst);
                }
            })
            .await;

        for i in 0u8..20 {
            broker.publish("products", 1, vec![i]).await.unwrap();
        }

        wait_until(2000, || count.load(Ordering::SeqCst) == 20).await;
        let seen = seen.lock().await;
        let expected: Vec<Vec<u8>> = (0u8..20).map(|i| vec![i]).collect();
        assert_eq!(*seen, expected);
    }

    #[tokio::test]
    async fn topics_are_isolated() {
        let broker = LocalBroker::default();
        let products = Arc::new(AtomicUsize::new(0));
        let reviews = Arc::new(AtomicUsize::new(0));

        let p = products.clone();
        broker
            .subscribe("products", move |_| {
                let p = p.clone();
                async move {
                    p.fetch_add(1, Ordering::SeqCst);
                }
            })
            .await;
        let r = reviews.clone();
        broker
            .subscribe("reviews", move |_| {
                let r = r.clone();
                async move {
                    r.fetch_add(1, Ordering::SeqCst);
                }
            })
            .await;

        broker.publish("products", 1, vec![1]).await.unwrap();
        broker.publish("products", 2, vec![2]).await.unwrap();
        broker.publish("reviews", 1, vec![3]).await.unwrap();

        wait_until(2000, || {
            products.load(Ordering::SeqCst) == 2 && reviews.load(Ordering::SeqCst) == 1
        })
        .await;
    }

    #[tokio::test]
    async fn negative_keys_route_to_a_valid_lane() {
        let broker = LocalBroker::new(3, 4, 8);
        let count = Arc::new(AtomicUsize::new(0));

        let c = count.clone();
        broker
            .subscribe("products", move |_| {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                }
            })
            .await;

        for key in [-7, -1, 0, 1] {
            broker.publish("products", key, vec![0]).await.unwrap();
        }
        wait_until(2000, || count.load(Ordering::SeqCst) == 4).await;
    }

    #[tokio::test]
    async fn slow_subscriber_does_not_lose_messages() {
        // Tight pool and lane bounds: publishes must wait, never drop.
        let broker = LocalBroker::new(1, 2, 1);
        let completed = Arc::new(AtomicUsize::new(0));

        let done = completed.clone();
        broker
            .subscribe("products", move |_| {
                let done = done.clone();
                async move {
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    done.fetch_add(1, Ordering::SeqCst);
                }
            })
            .await;

        let mut handles = Vec::new();
        for i in 0u8..10 {
            let broker = broker.clone();
            handles.push(tokio::spawn(async move {
                broker.publish("products", 1, vec![i]).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        wait_until(5000, || completed.load(Ordering::SeqCst) == 10).await;
    }

    #[tokio::test]
    async fn late_subscriber_misses_earlier_messages() {
        let broker = LocalBroker::default();
        broker.publish("products", 1, vec![1]).await.unwrap();
        // Let the drain task consume the message while nobody listens.
        tokio::time::sleep(Duration::from_millis(50)).await;

        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        broker
            .subscribe("products", move |_| {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                }
            })
            .await;

        broker.publish("products", 1, vec![2]).await.unwrap();
        wait_until(2000, || count.load(Ordering::SeqCst) == 1).await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
