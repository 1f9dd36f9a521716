use std::io::{self, BufRead, Write};

use aicli_core::chat::ChatSession;
use aicli_core::config::AicliConfig;
use aicli_core::llm::make_provider;
use aicli_core::prompts::{PromptKind, resolve_template};
use anyhow::{Context, Result};
use console::style;

use super::configured_prompt;

/// Handle the chat command
pub async fn handle_chat_command(config: &AicliConfig, prompt: Option<&str>) -> Result<()> {
    let settings = config.provider.resolve()?;
    let provider = make_provider(&settings);

    let template = resolve_template(
        PromptKind::Chat,
        prompt,
        configured_prompt(config, PromptKind::Chat),
    );
    let mut session =
        ChatSession::new(provider.as_ref(), &template).context("Failed to render chat prompt")?;

    println!(
        "{}",
        style("😊 Welcome to aicli chat! Type 'exit' or 'quit' to leave. 😊").cyan()
    );
    println!("Provider: {} / {}", settings.kind, settings.model);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        print!("{} ", style("You:").green().bold());
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            println!();
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" || line == "quit" {
            println!("😊 Goodbye! Chat again soon. 😊");
            break;
        }

        let reply = session
            .send(line)
            .await
            .context("Failed to generate a reply")?;
        println!("🤖: {reply}");
    }
    Ok(())
}
