use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::api::handlers::{draw, health, proxy, recommendations, stock};
use crate::app_state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/gemini", post(proxy))
        .route("/api/draw", get(draw))
        .route("/api/stock", post(stock))
        .route("/api/recommendations", post(recommendations))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
