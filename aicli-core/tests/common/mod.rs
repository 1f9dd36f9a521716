//! Shared test doubles for the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use aicli_core::llm::{BackendKind, LLMClient, LLMError, LLMResponse};
use async_trait::async_trait;

/// Replays a fixed list of replies and records every prompt it receives.
/// Once the script runs out, every call fails with a provider error.
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, LLMError>>>,
    prompts: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl ScriptedClient {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_results(replies.into_iter().map(|r| Ok(r.into())))
    }

    pub fn from_results<I>(replies: I) -> Self
    where
        I: IntoIterator<Item = Result<String, LLMError>>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// Sleep before answering, to exercise deadlines
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMClient for ScriptedClient {
    async fn generate(&self, prompt: &str) -> Result<LLMResponse, LLMError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let next = self.replies.lock().unwrap().pop_front();

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match next {
            Some(reply) => reply.map(|content| LLMResponse::new(content, "scripted")),
            None => Err(LLMError::Provider("script exhausted".to_string())),
        }
    }

    fn backend_kind(&self) -> BackendKind {
        BackendKind::OpenAI
    }

    fn model_id(&self) -> &str {
        "scripted"
    }
}

/// An oracle reply in the expected two-line format
pub fn oracle_reply(path: &str) -> String {
    format!("reason: testing\npath: {path}")
}
