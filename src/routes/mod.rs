use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::infra::app_state::AppState;
use crate::media::resolver;
use crate::webhook::handlers;

/// Two terminal branches per request: webhook intake and media retrieval.
/// Everything else falls through to a plain 404.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/webhook/{token}", post(handlers::handle_update))
        .route("/get/{access_code}", get(resolver::handle_retrieval))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}
