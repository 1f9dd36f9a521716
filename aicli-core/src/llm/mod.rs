//! # LLM Integration Layer
//!
//! Every command talks to a model through [`LLMClient`], a single
//! `generate(prompt)` capability. Provider-specific adapters implement it:
//!
//! | Provider | Adapter | Default model |
//! |----------|---------|---------------|
//! | OpenAI   | [`OpenAIProvider`] | gpt-4o |
//! | DeepSeek | [`DeepSeekProvider`] (OpenAI-compatible) | deepseek-chat |
//!
//! Commands that need a conversation history (`chat`) use the
//! message-level [`provider::LLMProvider`] trait instead.
//!
//! Clients are built from an explicit [`ProviderSettings`](crate::config::core::ProviderSettings)
//! value, never from ambient process state:
//!
//! ```rust,no_run
//! use aicli_core::config::loader::ConfigManager;
//! use aicli_core::llm::make_client;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = ConfigManager::load()?;
//! let settings = config.config().provider.resolve()?;
//! let client = make_client(&settings);
//! let reply = client.generate("Say hello").await?;
//! println!("{}", reply.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error_display;
pub mod provider;
pub mod providers;
pub mod types;

pub use client::{AnyClient, LLMClient, make_client, make_provider};
pub use provider::{LLMError, LLMProvider, LLMRequest, Message, MessageRole};
pub use providers::{DeepSeekProvider, OpenAIProvider};
pub use types::{BackendKind, LLMResponse, Usage};
