use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::ai::{CompletionProvider, CompletionRequest};

use super::prompt;
use super::ServiceError;

/// An affiliate product suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    pub description: String,
}

/// What the recommendations should relate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DealContext {
    Lotto,
    Stock(String),
    General,
}

impl DealContext {
    // A stock context needs a query, otherwise it is treated as general.
    fn request_prompt(&self) -> String {
        match self {
            DealContext::Lotto => prompt::fill(prompt::DEALS_LOTTO, &[]),
            DealContext::Stock(query) if !query.trim().is_empty() => {
                prompt::fill(prompt::DEALS_STOCK, &[("query", query.trim())])
            }
            DealContext::Stock(_) | DealContext::General => prompt::fill(prompt::DEALS_GENERAL, &[]),
        }
    }
}

/// Asks for strictly typed JSON: an array of `{name, description}` objects.
pub(crate) fn recommendation_config() -> Value {
    json!({
        "responseMimeType": "application/json",
        "responseSchema": {
            "type": "ARRAY",
            "items": {
                "type": "OBJECT",
                "properties": {
                    "name": { "type": "STRING", "description": "상품 이름" },
                    "description": { "type": "STRING", "description": "상품에 대한 짧은 설명" }
                },
                "required": ["name", "description"]
            }
        }
    })
}

pub(crate) fn recommendation_request(context: &DealContext) -> CompletionRequest {
    let request = context.request_prompt();
    CompletionRequest::text(prompt::fill(prompt::RECOMMEND, &[("request", request.as_str())]))
        .with_config(recommendation_config())
}

pub async fn recommend(
    provider: &dyn CompletionProvider,
    context: &DealContext,
) -> Result<Vec<Recommendation>, ServiceError> {
    let request = recommendation_request(context);
    let text = provider.complete(&request).await?;

    // Length and content are trusted; only the shape has to parse.
    let recommendations: Vec<Recommendation> = serde_json::from_str(&text)?;
    log::debug!(
        "{} recommendations for {:?}",
        recommendations.len(),
        context
    );
    Ok(recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::stub::StubProvider;

    fn prompt_of(request: &CompletionRequest) -> &str {
        request.contents.as_str().expect("text prompt")
    }

    #[test]
    fn lotto_prompt_asks_for_winner_purchases() {
        let request = recommendation_request(&DealContext::Lotto);
        let prompt = prompt_of(&request);
        assert!(prompt.starts_with("사람들이 로또 1등에 당첨되면"));
        assert!(prompt.ends_with("짧고 매력적인 설명을 포함해줘."));
        assert_eq!(request.config, Some(recommendation_config()));
    }

    #[test]
    fn stock_prompt_embeds_query() {
        let request = recommendation_request(&DealContext::Stock("반도체".to_string()));
        assert!(prompt_of(&request).starts_with("\"반도체\"와(과) 관련된"));
    }

    #[test]
    fn stock_without_query_falls_back_to_general() {
        let blank = recommendation_request(&DealContext::Stock("  ".to_string()));
        let general = recommendation_request(&DealContext::General);
        assert_eq!(blank, general);
    }

    #[tokio::test]
    async fn parses_provider_json_array() {
        let stub = StubProvider::replying(
            r#"[{"name":"요트","description":"바다 위의 휴식."},{"name":"시계","description":"품격."}]"#,
        );
        let deals = recommend(&stub, &DealContext::General)
            .await
            .expect("parsed");
        assert_eq!(
            deals,
            vec![
                Recommendation {
                    name: "요트".to_string(),
                    description: "바다 위의 휴식.".to_string()
                },
                Recommendation {
                    name: "시계".to_string(),
                    description: "품격.".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn any_array_length_is_accepted() {
        let stub = StubProvider::replying("[]");
        let deals = recommend(&stub, &DealContext::Lotto).await.expect("parsed");
        assert!(deals.is_empty());
    }

    #[tokio::test]
    async fn non_json_text_is_a_parse_error() {
        let stub = StubProvider::replying("Here are three great products: ...");
        let err = recommend(&stub, &DealContext::Lotto)
            .await
            .expect_err("not json");
        assert!(matches!(err, ServiceError::Parse(_)));
    }

    #[tokio::test]
    async fn provider_failure_is_propagated() {
        let stub = StubProvider::failing("boom");
        let err = recommend(&stub, &DealContext::Lotto)
            .await
            .expect_err("failed");
        assert!(matches!(err, ServiceError::Provider(_)));
    }
}
