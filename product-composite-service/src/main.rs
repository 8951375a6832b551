use std::sync::Arc;

use events::{LocalBroker, MessagePublisher, DEFAULT_LANE_CAPACITY};
use product_composite_service::config::CompositeConfig;
use product_composite_service::controllers;
use product_composite_service::integration::ProductCompositeIntegration;
use product_composite_service::service::ProductCompositeService;
use product_composite_service::state::AppState;
use tracing::info;
use util::{init_tracing, AppConfig, ServiceUtil};

#[tokio::main]
async fn main() {
    init_tracing();

    let app_config = AppConfig::load("product-composite").unwrap_or_else(|_| AppConfig::empty());
    let config = CompositeConfig::from_app_config(&app_config).expect("invalid configuration");

    let publisher: Arc<dyn MessagePublisher> = Arc::new(LocalBroker::new(
        config.partitions,
        config.publish_pool_size,
        DEFAULT_LANE_CAPACITY,
    ));
    let integration = Arc::new(ProductCompositeIntegration::from_config(&config, publisher));
    let service_util = Arc::new(ServiceUtil::new(config.port));
    let service = ProductCompositeService::new(integration, service_util);
    let app = controllers::router(AppState::new(service));

    let addr = format!("0.0.0.0:{}", config.port);
    info!("product-composite-service listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");
    axum::serve(listener, app).await.expect("server error");
}
