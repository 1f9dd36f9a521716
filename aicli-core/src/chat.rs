//! Multi-turn conversation state for `acl chat`.

use crate::llm::provider::{LLMError, LLMProvider, LLMRequest, Message, MessageRole};
use crate::prompts::templates::{PromptTemplate, TemplateError};
use serde::Serialize;

/// Template context for the chat system prompt
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChatContext {
    pub history: Vec<String>,
}

/// A conversation: the rendered system prompt followed by alternating turns.
pub struct ChatSession<'a> {
    provider: &'a dyn LLMProvider,
    history: Vec<Message>,
}

impl<'a> ChatSession<'a> {
    /// Render `template` with an empty history and start the conversation with it.
    pub fn new(provider: &'a dyn LLMProvider, template: &str) -> Result<Self, TemplateError> {
        let system_prompt = PromptTemplate::parse(template)?.render(&ChatContext::default())?;
        Ok(Self {
            provider,
            history: vec![Message::system(system_prompt)],
        })
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn system_prompt(&self) -> &str {
        self.history
            .first()
            .filter(|m| m.role == MessageRole::System)
            .map(|m| m.content.as_str())
            .unwrap_or_default()
    }

    /// Send one user turn with the whole history. A failed call leaves the
    /// history as it was before the turn.
    pub async fn send(&mut self, user_input: &str) -> Result<String, LLMError> {
        self.history.push(Message::user(user_input));

        let request = LLMRequest {
            messages: self.history.clone(),
            system_prompt: None,
            model: String::new(),
            max_tokens: None,
            temperature: None,
        };

        match self.provider.generate(request).await {
            Ok(response) => {
                self.history.push(Message::assistant(response.content.clone()));
                Ok(response.content)
            }
            Err(err) => {
                self.history.pop();
                Err(err)
            }
        }
    }
}
