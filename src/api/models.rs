use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::draw::Draw;
use crate::services::{DealContext, Recommendation};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ProxyResponse {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct DrawResponse {
    pub numbers: Draw,
    pub drawn_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct StockRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContextKind {
    Lotto,
    Stock,
    General,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsRequest {
    pub context: ContextKind,
    #[serde(default)]
    pub query: Option<String>,
}

impl RecommendationsRequest {
    pub fn deal_context(self) -> DealContext {
        match self.context {
            ContextKind::Lotto => DealContext::Lotto,
            ContextKind::Stock => DealContext::Stock(self.query.unwrap_or_default()),
            ContextKind::General => DealContext::General,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub provider: String,
    pub model: String,
}
