#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Gemini API key cannot be empty")]
    MissingApiKey,

    #[error("{0}")]
    Api(String),

    #[error("Provider returned no text: {0}")]
    EmptyResponse(String),

    #[error("Failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),
}
