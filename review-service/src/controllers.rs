//! REST transport for the review capability. The product is selected with a
//! `productId` query parameter rather than a path segment.

use api::core::Review;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::debug;
use util::http::error_to_response;

use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductIdQuery {
    product_id: i32,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/review",
            get(get_reviews).post(create_review).delete(delete_reviews),
        )
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn get_reviews(State(state): State<AppState>, Query(query): Query<ProductIdQuery>) -> Response {
    debug!("getReviews: lookup for productId: {}", query.product_id);
    match state.service.get_reviews(query.product_id) {
        Ok(reviews) => Json(reviews).into_response(),
        Err(err) => error_to_response(&err, "/review"),
    }
}

async fn create_review(State(state): State<AppState>, Json(review): Json<Review>) -> Response {
    match state.service.create_review(&review) {
        Ok(created) => Json(created).into_response(),
        Err(err) => error_to_response(&err, "/review"),
    }
}

async fn delete_reviews(
    State(state): State<AppState>,
    Query(query): Query<ProductIdQuery>,
) -> Response {
    state.service.delete_reviews(query.product_id);
    StatusCode::OK.into_response()
}
