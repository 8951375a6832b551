use std::sync::Arc;

use recommendation_service::controllers;
use recommendation_service::persistence::RecommendationRepository;
use recommendation_service::service::RecommendationService;
use recommendation_service::state::AppState;
use tracing::info;
use util::{init_tracing, AppConfig, ServiceUtil};

#[tokio::main]
async fn main() {
    init_tracing();

    let config = AppConfig::load("recommendation").unwrap_or_else(|_| AppConfig::empty());
    let port: u16 = config.get_or("server.port", 7002);

    let service_util = Arc::new(ServiceUtil::new(port));
    let service = RecommendationService::new(RecommendationRepository::new(), service_util);
    let app = controllers::router(AppState::new(service));

    let addr = format!("0.0.0.0:{port}");
    info!("recommendation-service listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");
    axum::serve(listener, app).await.expect("server error");
}
