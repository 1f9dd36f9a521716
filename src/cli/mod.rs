//! Command handlers for the `acl` binary.

mod chat;
mod config;
mod gen_cmd;
mod git_commit;
mod gomoku;
mod joke;
mod process_data;

pub use chat::handle_chat_command;
pub use config::handle_config_command;
pub use gen_cmd::handle_gen_cmd_command;
pub use git_commit::handle_git_commit_command;
pub use gomoku::handle_gomoku_command;
pub use joke::handle_joke_command;
pub use process_data::handle_process_data_command;

use aicli_core::config::AicliConfig;
use aicli_core::llm::{AnyClient, make_client};
use aicli_core::prompts::{PromptKind, PromptTemplate, resolve_template};
use anyhow::{Context, Result};
use serde_json::Value;

/// Build the client for the configured provider
fn client_for(config: &AicliConfig) -> Result<AnyClient> {
    let settings = config.provider.resolve()?;
    Ok(make_client(&settings))
}

/// Template override from `[prompts]` or its environment variable
fn configured_prompt(config: &AicliConfig, kind: PromptKind) -> Option<&str> {
    match kind {
        PromptKind::Chat => config.prompts.chat.as_deref(),
        PromptKind::GenCmd => config.prompts.gen_cmd.as_deref(),
        PromptKind::Joke => config.prompts.joke.as_deref(),
        PromptKind::GitCommit => config.prompts.git_commit.as_deref(),
    }
}

/// Pick and render a single-shot command's prompt
fn render_prompt(
    config: &AicliConfig,
    kind: PromptKind,
    flag: Option<&str>,
    context: &Value,
) -> Result<String> {
    let source = resolve_template(kind, flag, configured_prompt(config, kind));
    PromptTemplate::parse(&source)
        .and_then(|template| template.render(context))
        .context("Failed to render prompt template")
}
