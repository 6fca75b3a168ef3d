use std::sync::Arc;

use axum::{routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{handler::recommendations::recommendations_handler, AppState};

// Root URL response
async fn index() -> Json<serde_json::Value> {
    tracing::info!("Request for Root URL");
    Json(json!({
        "name": "Recommendations REST API Service",
        "version": "0.1",
    }))
}

// Health check handler
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/recommendations", recommendations_handler())
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .merge(api_route)
}
