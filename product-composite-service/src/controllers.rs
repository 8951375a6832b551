//! REST transport for the composite. Writes are accepted (202) rather than
//! completed synchronously, matching the event-capable write path.

use api::composite::ProductAggregate;
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
        .route(
            "/product-composite/{product_id}",
            get(get_composite).delete(delete_composite),
        )
        .route("/product-composite", post(create_composite))
        .route("/health", get(health))
        .route("/health/downstream", get(downstream_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn downstream_health(State(state): State<AppState>) -> Response {
    let report = state.service.downstream_health().await;
    let status = if report.all_up() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report)).into_response()
}

async fn get_composite(State(state): State<AppState>, Path(product_id): Path<i32>) -> Response {
    debug!("getComposite: lookup for productId: {product_id}");
    match state.service.get_composite(product_id).await {
        Ok(aggregate) => Json(aggregate).into_response(),
        Err(err) => error_to_response(&err, &format!("/product-composite/{product_id}")),
    }
}

// 202 in both delivery modes: in messaging mode the events are merely
// accepted for publication, and the sync mode (where the downstream creates
// have completed by now) keeps the same contract instead of leaking the
// delivery mode to callers.
async fn create_composite(
    State(state): State<AppState>,
    Json(aggregate): Json<ProductAggregate>,
) -> Response {
    match state.service.create_composite(&aggregate).await {
        Ok(()) => StatusCode::ACCEPTED.into_response(),
        Err(err) => error_to_response(&err, "/product-composite"),
    }
}

async fn delete_composite(State(state): State<AppState>, Path(product_id): Path<i32>) -> Response {
    match state.service.delete_composite(product_id).await {
        Ok(()) => StatusCode::ACCEPTED.into_response(),
        Err(err) => error_to_response(&err, &format!("/product-composite/{product_id}")),
    }
}
