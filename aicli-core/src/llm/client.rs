use super::provider::{LLMError, LLMProvider};
use super::providers::{DeepSeekProvider, OpenAIProvider};
use super::types::{BackendKind, LLMResponse};
use crate::config::core::{ProviderKind, ProviderSettings};
use async_trait::async_trait;

/// The single capability every command needs: prompt in, text out.
#[async_trait]
pub trait LLMClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<LLMResponse, LLMError>;
    fn backend_kind(&self) -> BackendKind;
    fn model_id(&self) -> &str;
}

/// Type-erased LLM client
pub type AnyClient = Box<dyn LLMClient>;

/// Create a prompt-level client for the configured provider
pub fn make_client(settings: &ProviderSettings) -> AnyClient {
    match settings.kind {
        ProviderKind::OpenAI => Box::new(OpenAIProvider::from_settings(settings)),
        ProviderKind::DeepSeek => Box::new(DeepSeekProvider::from_settings(settings)),
    }
}

/// Create a message-level provider, used where conversation history matters
pub fn make_provider(settings: &ProviderSettings) -> Box<dyn LLMProvider> {
    match settings.kind {
        ProviderKind::OpenAI => Box::new(OpenAIProvider::from_settings(settings)),
        ProviderKind::DeepSeek => Box::new(DeepSeekProvider::from_settings(settings)),
    }
}
