//! REST transport for the product capability.

use api::core::Product;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;
use tracing::debug;
use util::http::error_to_response;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/product/{product_id}", get(get_product).delete(delete_product))
        .route("/product", post(create_product))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn get_product(State(state): State<AppState>, Path(product_id): Path<i32>) -> Response {
    debug!("getProduct: lookup for productId: {product_id}");
    match state.service.get_product(product_id) {
        Ok(product) => Json(product).into_response(),
        Err(err) => error_to_response(&err, &format!("/product/{product_id}")),
    }
}

async fn create_product(State(state): State<AppState>, Json(product): Json<Product>) -> Response {
    match state.service.create_product(&product) {
        Ok(created) => Json(created).into_response(),
        Err(err) => error_to_response(&err, "/product"),
    }
}

async fn delete_product(State(state): State<AppState>, Path(product_id): Path<i32>) -> Response {
    state.service.delete_product(product_id);
    StatusCode::OK.into_response()
}
