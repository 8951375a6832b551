//! Typed view over the composite's configuration keys.

use events::{DEFAULT_PARTITIONS, DEFAULT_PUBLISH_POOL_SIZE};
use util::{AppConfig, ConfigError, ServiceEndpoint};

/// How composite writes reach the core services.
///
/// `Sync` is the default: it works whenever the REST endpoints are
/// reachable. `Messaging` requires a broker with the core-service
/// consumers subscribed, so it is opt-in per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// POST/DELETE the downstream REST endpoints and wait for the response.
    Sync,
    /// Publish CREATE/DELETE envelopes on the message channels.
    Messaging,
}

impl DeliveryMode {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "sync" => Ok(DeliveryMode::Sync),
            "messaging" => Ok(DeliveryMode::Messaging),
            _ => Err(ConfigError::TypeMismatch {
                key: "app.delivery-mode".to_string(),
                expected: "sync|messaging",
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompositeConfig {
    pub port: u16,
    pub product: ServiceEndpoint,
    pub recommendation: ServiceEndpoint,
    pub review: ServiceEndpoint,
    pub delivery_mode: DeliveryMode,
    pub publish_pool_size: usize,
    pub partitions: usize,
}

impl CompositeConfig {
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let delivery_mode =
            DeliveryMode::parse(&config.get_or("app.delivery-mode", "sync".to_string()))?;

        Ok(CompositeConfig {
            port: config.get_or("server.port", 7000),
            product: endpoint(config, "app.product-service", 7001),
            recommendation: endpoint(config, "app.recommendation-service", 7002),
            review: endpoint(config, "app.review-service", 7003),
            delivery_mode,
            publish_pool_size: config
                .get_or("app.publish-event-pool-size", DEFAULT_PUBLISH_POOL_SIZE),
            partitions: config.get_or("app.publish-event-partitions", DEFAULT_PARTITIONS),
        })
    }
}

fn endpoint(config: &AppConfig, prefix: &str, default_port: u16) -> ServiceEndpoint {
    ServiceEndpoint {
        host: config.get_or(&format!("{prefix}.host"), "localhost".to_string()),
        port: config.get_or(&format!("{prefix}.port"), default_port),
        https: config.get_or(&format!("{prefix}.https"), false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_keys_are_missing() {
        let config = CompositeConfig::from_app_config(&AppConfig::empty()).unwrap();
        assert_eq!(config.port, 7000);
        assert_eq!(config.product.url(), "http://localhost:7001");
        assert_eq!(config.review.url(), "http://localhost:7003");
        // Messaging needs subscribed consumers; a bare binary must not
        // default to a channel nobody drains.
        assert_eq!(config.delivery_mode, DeliveryMode::Sync);
        assert_eq!(config.publish_pool_size, DEFAULT_PUBLISH_POOL_SIZE);
    }

    #[test]
    fn yaml_keys_are_honored() {
        let yaml = r#"
server:
  port: 8000
app:
  delivery-mode: messaging
  publish-event-pool-size: 4
  product-service:
    host: product
    port: 8080
    https: true
"#;
        let app_config = AppConfig::from_yaml_str(yaml, "test").unwrap();
        let config = CompositeConfig::from_app_config(&app_config).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.delivery_mode, DeliveryMode::Messaging);
        assert_eq!(config.publish_pool_size, 4);
        assert_eq!(config.product.url(), "https://product:8080");
        assert_eq!(config.recommendation.url(), "http://localhost:7002");
    }

    #[test]
    fn unknown_delivery_mode_is_rejected() {
        assert!(DeliveryMode::parse("carrier-pigeon").is_err());
    }
}
