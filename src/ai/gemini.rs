use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::error::ProviderError;
use super::provider::{CompletionProvider, CompletionRequest};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

// Config keys that live beside `generationConfig` in the REST body.
const TOP_LEVEL_KEYS: [&str; 6] = [
    "systemInstruction",
    "safetySettings",
    "tools",
    "toolConfig",
    "cachedContent",
    "labels",
];

// Client-side SDK options with no REST counterpart.
const CLIENT_ONLY_KEYS: [&str; 2] = ["httpOptions", "abortSignal"];

pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiRequest {
    contents: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<Map<String, Value>>,
    #[serde(flatten)]
    top_level: Map<String, Value>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize, Debug)]
struct GeminiPart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorBody,
}

#[derive(Deserialize)]
struct GeminiErrorBody {
    message: String,
}

impl GeminiProvider {
    pub fn new(
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
    ) -> Result<Self, ProviderError> {
        if api_key.is_empty() {
            return Err(ProviderError::MissingApiKey);
        }

        Ok(Self {
            client: Client::new(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        let url = self.endpoint();
        let body = build_request(request);
        log::debug!("Gemini request to {}: {:?}", url, body);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                log::error!("Gemini request failed: {}", e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = api_error_message(&error_text);
            log::error!("Gemini API error ({}): {}", status, message);
            return Err(ProviderError::Api(format!("{}: {}", status, message)));
        }

        let bytes = response.bytes().await?;
        let data: GeminiResponse = serde_json::from_slice(&bytes).map_err(|e| {
            log::error!("Failed to parse Gemini response: {}", e);
            e
        })?;

        extract_text(&data)
    }

    fn name(&self) -> &str {
        "Gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Shapes an SDK-style `{contents, config}` pair into a `generateContent` body.
pub(crate) fn build_request(request: &CompletionRequest) -> GeminiRequest {
    let mut generation_config = Map::new();
    let mut top_level = Map::new();

    if let Some(Value::Object(config)) = &request.config {
        for (key, value) in config {
            if CLIENT_ONLY_KEYS.contains(&key.as_str()) {
                continue;
            }
            if key == "systemInstruction" {
                top_level.insert(key.clone(), system_instruction(value));
            } else if TOP_LEVEL_KEYS.contains(&key.as_str()) {
                top_level.insert(key.clone(), value.clone());
            } else {
                generation_config.insert(key.clone(), value.clone());
            }
        }
    } else if let Some(other) = &request.config {
        log::warn!("Ignoring non-object generation config: {}", other);
    }

    GeminiRequest {
        contents: normalize_contents(&request.contents),
        generation_config: if generation_config.is_empty() {
            None
        } else {
            Some(generation_config)
        },
        top_level,
    }
}

fn normalize_contents(contents: &Value) -> Vec<Value> {
    match contents {
        Value::Array(items) if !items.is_empty() && items.iter().all(is_turn) => items.clone(),
        Value::Array(items) => vec![user_turn(items.iter().map(to_part).collect())],
        turn if is_turn(turn) => vec![turn.clone()],
        other => vec![user_turn(vec![to_part(other)])],
    }
}

fn is_turn(value: &Value) -> bool {
    value.get("parts").is_some()
}

fn to_part(value: &Value) -> Value {
    match value {
        Value::String(text) => json!({ "text": text }),
        Value::Object(_) => value.clone(),
        other => json!({ "text": other.to_string() }),
    }
}

fn user_turn(parts: Vec<Value>) -> Value {
    json!({ "role": "user", "parts": parts })
}

fn system_instruction(value: &Value) -> Value {
    match value {
        Value::String(text) => json!({ "parts": [{ "text": text }] }),
        other => other.clone(),
    }
}

/// Concatenates the first candidate's non-thought text parts.
pub(crate) fn extract_text(response: &GeminiResponse) -> Result<String, ProviderError> {
    let candidate = match response.candidates.first() {
        Some(c) => c,
        None => {
            let reason = response
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.clone())
                .map(|r| format!("prompt blocked ({})", r))
                .unwrap_or_else(|| "no candidates".to_string());
            return Err(ProviderError::EmptyResponse(reason));
        }
    };

    let texts: Vec<&str> = candidate
        .content
        .as_ref()
        .map(|c| {
            c.parts
                .iter()
                .filter(|p| !p.thought)
                .filter_map(|p| p.text.as_deref())
                .collect()
        })
        .unwrap_or_default();

    if texts.is_empty() {
        let reason = candidate
            .finish_reason
            .as_ref()
            .map(|r| format!("finish reason {}", r))
            .unwrap_or_else(|| "candidate has no text parts".to_string());
        return Err(ProviderError::EmptyResponse(reason));
    }

    Ok(texts.concat())
}

// Prefer the provider's own error message, fall back to the raw body.
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<GeminiErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body.to_string(),
    }
}
