//! # aicli-core - Runtime for the `acl` command-line assistant
//!
//! `aicli-core` holds everything behind the `acl` binary: provider clients,
//! configuration, prompt templates, and the features built on top of them.
//!
//! ## Highlights
//!
//! - **Provider Abstraction**: a single [`LLMClient`] capability with
//!   adapters for OpenAI and DeepSeek (OpenAI-compatible).
//! - **Gomoku**: a 15x15 five-in-a-row engine where the model plays the
//!   second side. Its moves are parsed from free text and retried on invalid
//!   or occupied targets.
//! - **Batch Processing**: CSV rows rendered through `{{.Content}}` templates
//!   and sent one at a time under a per-row deadline.
//! - **Configuration-First**: `aicli.toml`, `AICLI_*` environment variables
//!   and CLI flags resolve into one explicit [`AicliConfig`].
//!
//! ## Architecture Overview
//!
//! - `config/`: configuration loader, defaults, and validation.
//! - `llm/`: provider clients, request shaping, and response handling.
//! - `prompts/`: `{{.Field}}` templates and the built-in prompts.
//! - `gomoku/`: board engine, move notation, oracle move resolution, and the
//!   interactive session.
//! - `batch/`: batch pipeline over CSV files or SQLite tables.
//! - `chat`: multi-turn conversation state.
//! - `git`: working-tree status, staging, commit, and editor lookup.
//! - `cli/`: argument definitions shared with the binary.
//!
//! ## Quickstart
//!
//! ```rust,ignore
//! use aicli_core::{ConfigManager, RetryPolicy, make_client, play_gomoku};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), anyhow::Error> {
//!     let config = ConfigManager::load()?.into_config();
//!     let client = make_client(&config.provider.resolve()?);
//!     let policy = RetryPolicy::new(config.gomoku.oracle_max_attempts);
//!
//!     let stdin = std::io::stdin();
//!     play_gomoku(client.as_ref(), policy, stdin.lock(), std::io::stdout()).await?;
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod chat;
pub mod cli;
pub mod config;
pub mod git;
pub mod gomoku;
pub mod llm;
pub mod prompts;

// Re-exports for convenience
pub use batch::{BatchProcessor, BatchSummary, RowOutcome};
pub use chat::ChatSession;
pub use cli::args::{Cli, Commands};
pub use config::{AicliConfig, ConfigError, ConfigManager, ProviderKind, ProviderSettings};
pub use gomoku::{GameOutcome, GameState, GomokuError, GomokuSession, RetryPolicy, play_gomoku};
pub use llm::{AnyClient, LLMClient, LLMError, LLMResponse, make_client, make_provider};
pub use prompts::{PromptKind, PromptTemplate, TemplateError, resolve_template};
