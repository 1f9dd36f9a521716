use crate::config::constants::{models, urls};
use crate::config::core::ProviderSettings;
use crate::llm::client::LLMClient;
use crate::llm::provider::{LLMError, LLMProvider, LLMRequest};
use crate::llm::providers::openai::OpenAIProvider;
use crate::llm::types::{BackendKind, LLMResponse};
use async_trait::async_trait;
use std::time::Duration;

/// DeepSeek provider that leverages the OpenAI-compatible chat API surface
pub struct DeepSeekProvider {
    inner: OpenAIProvider,
    model: String,
}

impl DeepSeekProvider {
    pub fn new(api_key: String) -> Self {
        Self::from_config(api_key, None, None, None)
    }

    pub fn from_config(
        api_key: String,
        model: Option<String>,
        endpoint: Option<String>,
        timeout: Option<Duration>,
    ) -> Self {
        let resolved_model = model.unwrap_or_else(|| models::deepseek::DEFAULT_MODEL.to_string());
        let resolved_endpoint =
            endpoint.unwrap_or_else(|| urls::DEEPSEEK_CHAT_COMPLETIONS.to_string());
        let inner = OpenAIProvider::from_config(
            api_key,
            Some(resolved_model.clone()),
            Some(resolved_endpoint),
            timeout,
        )
        .with_display_name("DeepSeek");

        Self {
            inner,
            model: resolved_model,
        }
    }

    pub fn from_settings(settings: &ProviderSettings) -> Self {
        Self::from_config(
            settings.api_key.clone(),
            Some(settings.model.clone()),
            Some(settings.endpoint.clone()),
            Some(settings.timeout),
        )
    }

    pub fn endpoint(&self) -> &str {
        self.inner.endpoint()
    }
}

#[async_trait]
impl LLMProvider for DeepSeekProvider {
    fn name(&self) -> &str {
        "deepseek"
    }

    async fn generate(&self, mut request: LLMRequest) -> Result<LLMResponse, LLMError> {
        if request.model.trim().is_empty() {
            request.model = self.model.clone();
        }
        LLMProvider::generate(&self.inner, request).await
    }
}

#[async_trait]
impl LLMClient for DeepSeekProvider {
    async fn generate(&self, prompt: &str) -> Result<LLMResponse, LLMError> {
        LLMProvider::generate(self, LLMRequest::from_prompt(prompt)).await
    }

    fn backend_kind(&self) -> BackendKind {
        BackendKind::DeepSeek
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}
