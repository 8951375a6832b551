use std::sync::Arc;

use review_service::controllers;
use review_service::persistence::ReviewRepository;
use review_service::service::ReviewService;
use review_service::state::AppState;
use tracing::info;
use util::{init_tracing, AppConfig, ServiceUtil};

#[tokio::main]
async fn main() {
    init_tracing();

    let config = AppConfig::load("review").unwrap_or_else(|_| AppConfig::empty());
    let port: u16 = config.get_or("server.port", 7003);

    let service_util = Arc::new(ServiceUtil::new(port));
    let service = ReviewService::new(ReviewRepository::new(), service_util);
    let app = controllers::router(AppState::new(service));

    let addr = format!("0.0.0.0:{port}");
    info!("review-service listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");
    axum::serve(listener, app).await.expect("server error");
}
