use axum::{body::Bytes, extract::State, Json};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::ai::CompletionRequest;
use crate::api::error::ApiError;
use crate::api::models::{
    DrawResponse, HealthResponse, ProxyResponse, RecommendationsRequest,
    RecommendationsResponse, StockRequest,
};
use crate::app_state::AppState;
use crate::draw::Draw;
use crate::services::{self, ServiceError, FALLBACK_MESSAGE};

pub(crate) const MISSING_BODY: &str = "Request body is missing";
pub(crate) const MISSING_CONTENTS: &str = "Missing \"contents\" in request body";
pub(crate) const NULL_BODY: &str = "Cannot read \"contents\" of a null request body";
pub(crate) const MISSING_QUERY: &str = "Missing \"query\" in request body";

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        provider: state.provider.name().to_string(),
        model: state.provider.model().to_string(),
    })
}

/// Forwards `{contents, config?}` to the provider and returns `{text}`.
pub async fn proxy(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ProxyResponse>, ApiError> {
    if body.is_empty() {
        log::warn!("Proxy request without body");
        return Err(ApiError::bad_request(MISSING_BODY));
    }

    // An unparseable body is reported like any other failure inside the call.
    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        log::error!("Error in completion proxy: {}", e);
        ApiError::internal(e.to_string())
    })?;

    // A literal `null` body cannot be destructured; treated as a failure, not a client error.
    if payload.is_null() {
        log::error!("Error in completion proxy: request body is null");
        return Err(ApiError::internal(NULL_BODY));
    }

    let contents = match payload.get("contents") {
        Some(contents) if !is_falsy(contents) => contents.clone(),
        _ => {
            log::warn!("Proxy request without contents");
            return Err(ApiError::bad_request(MISSING_CONTENTS));
        }
    };
    let config = payload.get("config").filter(|c| !c.is_null()).cloned();

    let request = CompletionRequest::new(contents, config);
    log::info!(
        "Forwarding completion request to {} ({})",
        state.provider.name(),
        state.provider.model()
    );

    let text = state.provider.complete(&request).await.map_err(|e| {
        log::error!("Error in completion proxy: {}", e);
        ApiError::internal(e.to_string())
    })?;

    Ok(Json(ProxyResponse { text }))
}

pub async fn draw() -> Json<DrawResponse> {
    let numbers = Draw::generate();
    log::info!("Drew {:?}", numbers.numbers());
    Json(DrawResponse {
        numbers,
        drawn_at: Utc::now(),
    })
}

pub async fn stock(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ProxyResponse>, ApiError> {
    let request: StockRequest = parse_body(&body)?;
    log::info!("Stock question: {}", request.query.trim());

    match services::answer_stock_question(state.provider.as_ref(), &request.query).await {
        Ok(text) => Ok(Json(ProxyResponse { text })),
        Err(ServiceError::EmptyQuery) => Err(ApiError::bad_request(MISSING_QUERY)),
        Err(e) => {
            log::error!("Stock question failed: {}", e);
            Err(ApiError::internal(FALLBACK_MESSAGE))
        }
    }
}

pub async fn recommendations(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<RecommendationsResponse>, ApiError> {
    let request: RecommendationsRequest = parse_body(&body)?;
    let context = request.deal_context();
    log::info!("Recommendations for {:?}", context);

    match services::recommend(state.provider.as_ref(), &context).await {
        Ok(recommendations) => Ok(Json(RecommendationsResponse { recommendations })),
        Err(e) => {
            log::error!("Error fetching recommendations: {}", e);
            Err(ApiError::internal(FALLBACK_MESSAGE))
        }
    }
}

// Feature endpoints reject bad bodies with the same envelope as the proxy.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    if body.is_empty() {
        return Err(ApiError::bad_request(MISSING_BODY));
    }
    serde_json::from_slice(body).map_err(|e| {
        log::warn!("Rejected request body: {}", e);
        ApiError::bad_request(format!("Invalid request body: {}", e))
    })
}

// Mirrors what a JavaScript caller treats as "no contents".
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
