use std::sync::Arc;

use product_service::controllers;
use product_service::persistence::ProductRepository;
use product_service::service::ProductService;
use product_service::state::AppState;
use tracing::info;
use util::{init_tracing, AppConfig, ServiceUtil};

#[tokio::main]
async fn main() {
    init_tracing();

    let config = AppConfig::load("product").unwrap_or_else(|_| AppConfig::empty());
    let port: u16 = config.get_or("server.port", 7001);

    let service_util = Arc::new(ServiceUtil::new(port));
    let service = ProductService::new(ProductRepository::new(), service_util);
    let app = controllers::router(AppState::new(service));

    let addr = format!("0.0.0.0:{port}");
    info!("product-service listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");
    axum::serve(listener, app).await.expect("server error");
}
