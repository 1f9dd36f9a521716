use std::path::Path;

use aicli_core::config::AicliConfig;
use anyhow::{Result, bail};
use console::style;

/// Handle the config command
pub async fn handle_config_command(output: Option<&Path>, force: bool) -> Result<()> {
    let Some(output_path) = output else {
        print!("{}", AicliConfig::sample_config()?);
        return Ok(());
    };

    if output_path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite it",
            output_path.display()
        );
    }

    AicliConfig::create_sample_config(output_path)?;
    println!(
        "{} configuration written to {}",
        style("Done:").green().bold(),
        output_path.display()
    );
    Ok(())
}
