use std::io::Write;

use aicli_core::config::AicliConfig;
use aicli_core::git::{self, GitRepo};
use aicli_core::prompts::PromptKind;
use anyhow::{Context, Result, bail};
use console::style;
use dialoguer::Confirm;
use serde_json::json;
use tracing::info;

use super::{client_for, render_prompt};

/// Handle the git-cmt command
pub async fn handle_git_commit_command(config: &AicliConfig, prompt: Option<&str>) -> Result<()> {
    let repo = GitRepo::current()?;
    let changes = repo.changes().context("Failed to read git changes")?;
    if changes.is_empty() {
        println!("No changes to commit.");
        return Ok(());
    }
    info!("current changes:\n{changes}");

    let prompt = render_prompt(
        config,
        PromptKind::GitCommit,
        prompt,
        &json!({ "Changes": changes }),
    )?;
    let client = client_for(config)?;
    let suggestion = client
        .generate(&prompt)
        .await
        .context("Failed to generate a commit message")?
        .content;

    println!("\n{}\n{}\n", style("Suggested commit message:").cyan().bold(), suggestion);

    let message = edit_message(&suggestion)?;
    if message.is_empty() {
        bail!("Commit message is empty; commit aborted");
    }
    println!("\n{}\n{}\n", style("Final commit message:").cyan().bold(), message);

    let confirmed = Confirm::new()
        .with_prompt("Stage all changes and commit?")
        .default(true)
        .interact()?;
    if !confirmed {
        println!("{}", style("Cancelled.").yellow());
        return Ok(());
    }

    repo.add_all()?;
    info!("'git add .' succeeded");
    let output = repo.commit(&message)?;
    println!("{}", output.trim_end());
    println!("{}", style("Committed.").green());
    Ok(())
}

/// Let the user edit `initial` in their editor and return the trimmed result.
fn edit_message(initial: &str) -> Result<String> {
    let editor = git::resolve_editor(
        std::env::var("EDITOR").ok(),
        std::env::var_os("PATH").as_deref(),
    )
    .context("EDITOR is not set and neither vim nor nano is installed")?;

    let mut file = tempfile::Builder::new()
        .prefix("commit_message_")
        .suffix(".txt")
        .tempfile()
        .context("Failed to create a temporary file")?;
    file.write_all(initial.as_bytes())?;
    file.flush()?;

    git::open_in_editor(&editor, file.path())?;

    let edited = std::fs::read_to_string(file.path())
        .context("Failed to read the edited commit message")?;
    Ok(edited.trim().to_string())
}
