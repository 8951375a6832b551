//! Envelope carried on the message channels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    Create,
    Delete,
}

/// Generic CREATE/DELETE envelope.
///
/// `key` doubles as the partition key so that all events for one product
/// land on the same ordering lane. `event_created_at` is wall-clock time and
/// is deliberately excluded from equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event<K, T> {
    pub event_type: EventType,
    pub key: K,
    pub data: Option<T>,
    pub event_created_at: DateTime<Utc>,
}

impl<K, T> Event<K, T> {
    pub fn create(key: K, data: T) -> Self {
        Self {
            event_type: EventType::Create,
            key,
            data: Some(data),
            event_created_at: Utc::now(),
        }
    }

    pub fn delete(key: K) -> Self {
        Self {
            event_type: EventType::Delete,
            key,
            data: None,
            event_created_at: Utc::now(),
        }
    }
}

impl<K: PartialEq, T: PartialEq> PartialEq for Event<K, T> {
    fn eq(&self, other: &Self) -> bool {
        self.event_type == other.event_type && self.key == other.key && self.data == other.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Product;

    #[test]
    fn equality_ignores_creation_time() {
        let mut a = Event::create(1, Product::new(1, "p", 1));
        let b = Event::create(1, Product::new(1, "p", 1));
        a.event_created_at = Utc::now() - chrono::Duration::hours(1);
        assert_eq!(a, b);
    }

    #[test]
    fn equality_compares_type_key_and_data() {
        let create: Event<i32, Product> = Event::create(1, Product::new(1, "p", 1));
        let delete: Event<i32, Product> = Event::delete(1);
        let other_key: Event<i32, Product> = Event::create(2, Product::new(1, "p", 1));
        assert_ne!(create, delete);
        assert_ne!(create, other_key);
    }

    #[test]
    fn wire_shape_is_camel_case() {
        let event: Event<i32, Product> = Event::delete(42);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["eventType"], "DELETE");
        assert_eq!(json["key"], 42);
        assert!(json["data"].is_null());
        assert!(json["eventCreatedAt"].is_string());
    }

    #[test]
    fn round_trips_through_json() {
        let event = Event::create(7, Product::new(7, "chair", 12));
        let bytes = serde_json::to_vec(&event).unwrap();
        let parsed: Event<i32, Product> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, event);
        assert_eq!(parsed.data.unwrap().name, "chair");
    }
}
