// Enrichment features built on top of the completion provider.

pub mod prompt;
pub mod recommend;
pub mod stock;

pub use recommend::{recommend, DealContext, Recommendation};
pub use stock::answer_stock_question;

use crate::ai::ProviderError;

/// Shown to users whenever an enrichment call fails; the cause is only logged.
pub const FALLBACK_MESSAGE: &str = "정보를 가져오는 데 실패했습니다. 다시 시도해주세요.";

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("query is empty")]
    EmptyQuery,

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("provider output is not a recommendation list: {0}")]
    Parse(#[from] serde_json::Error),
}
