pub mod error;
pub mod gemini;
pub mod provider;
#[cfg(test)]
pub(crate) mod stub;

pub use error::ProviderError;
pub use gemini::GeminiProvider;
pub use provider::{CompletionProvider, CompletionRequest};
