use crate::ai::{CompletionProvider, CompletionRequest};

use super::prompt;
use super::ServiceError;

// Beginner-friendly explanation of a stock question.
pub async fn answer_stock_question(
    provider: &dyn CompletionProvider,
    query: &str,
) -> Result<String, ServiceError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(ServiceError::EmptyQuery);
    }

    let request = CompletionRequest::text(prompt::fill(prompt::STOCK, &[("query", query)]));
    let text = provider.complete(&request).await?;
    Ok(text)
}
