use crate::config::constants::{models, urls};
use crate::config::core::ProviderSettings;
use crate::llm::client::LLMClient;
use crate::llm::error_display;
use crate::llm::provider::{LLMError, LLMProvider, LLMRequest};
use crate::llm::types::{BackendKind, LLMResponse, Usage};
use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};

/// Adapter for OpenAI-compatible `chat/completions` endpoints.
pub struct OpenAIProvider {
    api_key: String,
    http_client: HttpClient,
    endpoint: String,
    model: String,
    timeout: Option<Duration>,
    display_name: &'static str,
}

impl OpenAIProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, models::openai::DEFAULT_MODEL.to_string())
    }

    pub fn with_model(api_key: String, model: String) -> Self {
        Self::from_config(api_key, Some(model), None, None)
    }

    pub fn from_config(
        api_key: String,
        model: Option<String>,
        endpoint: Option<String>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            api_key,
            http_client: build_http_client(timeout),
            endpoint: endpoint.unwrap_or_else(|| urls::OPENAI_CHAT_COMPLETIONS.to_string()),
            model: model.unwrap_or_else(|| models::openai::DEFAULT_MODEL.to_string()),
            timeout,
            display_name: "OpenAI",
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

    /// Label used in error messages, so wrapping adapters report their own name.
    pub(crate) fn with_display_name(mut self, display_name: &'static str) -> Self {
        self.display_name = display_name;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn error(&self, message: &str) -> String {
        error_display::format_llm_error(self.display_name, message)
    }

    pub(crate) fn build_request_body(&self, request: &LLMRequest) -> Value {
        let mut messages = Vec::new();

        if let Some(system_prompt) = &request.system_prompt {
            messages.push(json!({
                "role": "system",
                "content": system_prompt
            }));
        }

        for msg in &request.messages {
            messages.push(json!({
                "role": msg.role.as_str(),
                "content": msg.content
            }));
        }

        let model = if request.model.trim().is_empty() {
            self.model.as_str()
        } else {
            request.model.as_str()
        };

        let mut body = json!({
            "model": model,
            "messages": messages,
        });
        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        if let Some(temperature) = request.temperature {
            body["temperature"] = json!(temperature);
        }
        body
    }

    pub(crate) fn parse_response(&self, response: Value) -> Result<LLMResponse, LLMError> {
        let content = response
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(Value::as_str)
            .ok_or_else(|| LLMError::Provider(self.error("API returned an empty result")))?;

        let model = response
            .get("model")
            .and_then(Value::as_str)
            .unwrap_or(&self.model)
            .to_string();

        let usage = response.get("usage").map(|usage| {
            let field = |name: &str| usage.get(name).and_then(Value::as_u64).unwrap_or(0) as usize;
            Usage {
                prompt_tokens: field("prompt_tokens"),
                completion_tokens: field("completion_tokens"),
                total_tokens: field("total_tokens"),
            }
        });

        Ok(LLMResponse {
            content: content.trim().to_string(),
            model,
            usage,
        })
    }

    fn map_status(&self, status: StatusCode, body: &str) -> LLMError {
        let formatted = self.error(&format!("HTTP {status}: {body}"));
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LLMError::Authentication(formatted),
            StatusCode::TOO_MANY_REQUESTS => LLMError::RateLimit,
            StatusCode::BAD_REQUEST => LLMError::InvalidRequest(formatted),
            _ => LLMError::Provider(formatted),
        }
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
        self.validate_request(&request)?;
        let body = self.build_request_body(&request);
        debug!(endpoint = %self.endpoint, model = %body["model"], "sending chat completion");

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| match self.timeout {
                Some(timeout) if e.is_timeout() => LLMError::Timeout(timeout.as_secs()),
                _ => LLMError::Network(self.error(&format!("Network error: {e}"))),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(self.map_status(status, &error_text));
        }

        let payload: Value = response.json().await.map_err(|e| {
            LLMError::Provider(self.error(&format!("Failed to parse response: {e}")))
        })?;

        self.parse_response(payload)
    }
}

#[async_trait]
impl LLMClient for OpenAIProvider {
    async fn generate(&self, prompt: &str) -> Result<LLMResponse, LLMError> {
        LLMProvider::generate(self, LLMRequest::from_prompt(prompt)).await
    }

    fn backend_kind(&self) -> BackendKind {
        BackendKind::OpenAI
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

/// HTTP client with the request timeout applied. A builder failure falls back
/// to a client without a timeout and is logged.
fn build_http_client(timeout: Option<Duration>) -> HttpClient {
    let Some(timeout) = timeout else {
        return HttpClient::new();
    };
    match HttpClient::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(err) => {
            warn!(
                error = %err,
                timeout_secs = timeout.as_secs(),
                "failed to build HTTP client with timeout, requests will not time out"
            );
            HttpClient::new()
        }
    }
}
