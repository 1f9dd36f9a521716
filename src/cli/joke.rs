use aicli_core::config::AicliConfig;
use aicli_core::prompts::PromptKind;
use anyhow::{Context, Result};
use serde_json::Value;

use super::{client_for, render_prompt};

/// Handle the joke command
pub async fn handle_joke_command(config: &AicliConfig, prompt: Option<&str>) -> Result<()> {
    let prompt = render_prompt(config, PromptKind::Joke, prompt, &Value::Null)?;

    let client = client_for(config)?;
    let response = client
        .generate(&prompt)
        .await
        .context("Failed to generate a joke")?;

    println!("\n😂😂😂\n{}\n😂😂😂\n", response.content);
    Ok(())
}
