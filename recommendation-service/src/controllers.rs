//! REST transport for the recommendation capability. The product is selected
//! with a `productId` query parameter rather than a path segment.

use api::core::Recommendation;
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
            "/recommendation",
            get(get_recommendations)
                .post(create_recommendation)
                .delete(delete_recommendations),
        )
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn get_recommendations(
    State(state): State<AppState>,
    Query(query): Query<ProductIdQuery>,
) -> Response {
    debug!("getRecommendations: lookup for productId: {}", query.product_id);
    match state.service.get_recommendations(query.product_id) {
        Ok(recommendations) => Json(recommendations).into_response(),
        Err(err) => error_to_response(&err, "/recommendation"),
    }
}

async fn create_recommendation(
    State(state): State<AppState>,
    Json(recommendation): Json<Recommendation>,
) -> Response {
    match state.service.create_recommendation(&recommendation) {
        Ok(created) => Json(created).into_response(),
        Err(err) => error_to_response(&err, "/recommendation"),
    }
}

async fn delete_recommendations(
    State(state): State<AppState>,
    Query(query): Query<ProductIdQuery>,
) -> Response {
    state.service.delete_recommendations(query.product_id);
    StatusCode::OK.into_response()
}
