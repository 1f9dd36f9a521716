use aicli_core::config::AicliConfig;
use aicli_core::prompts::PromptKind;
use anyhow::{Context, Result, bail};
use serde_json::json;

use super::{client_for, render_prompt};

/// Handle the gen-cmd command
pub async fn handle_gen_cmd_command(
    config: &AicliConfig,
    description: &str,
    prompt: Option<&str>,
) -> Result<()> {
    if description.trim().is_empty() {
        bail!("No description provided. Use: acl gen-cmd \"what the command should do\"");
    }

    let context = json!({
        "Description": description,
        "OS": std::env::consts::OS,
        "Arch": std::env::consts::ARCH,
    });
    let prompt = render_prompt(config, PromptKind::GenCmd, prompt, &context)?;

    let client = client_for(config)?;
    let response = client
        .generate(&prompt)
        .await
        .context("Failed to generate a command")?;

    println!("\n{}\n", response.content);
    Ok(())
}
