//! `acl` - LLM-powered command-line helpers

use anyhow::Result;
use clap::Parser;
use console::style;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use aicli_core::cli::args::{Cli, Commands};
use aicli_core::config::ConfigManager;
use aicli_core::config::constants::defaults;

mod cli;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{} {err:#}", style("Error:").red().bold());
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Cli::parse();

    let mut manager = ConfigManager::bootstrap(args.config.as_deref())?;
    manager
        .config_mut()
        .apply_cli_overrides(args.provider.as_deref(), args.model.as_deref())?;
    manager.config().validate()?;

    init_tracing(args.log_level.as_deref(), &manager.config().logging.level);
    if let Some(path) = manager.config_path() {
        debug!(path = %path.display(), "loaded configuration");
    }

    let config = manager.into_config();
    match args.command {
        Commands::Chat { prompt } => cli::handle_chat_command(&config, prompt.as_deref()).await,
        Commands::GenCmd {
            description,
            prompt,
        } => cli::handle_gen_cmd_command(&config, &description.join(" "), prompt.as_deref()).await,
        Commands::Joke { prompt } => cli::handle_joke_command(&config, prompt.as_deref()).await,
        Commands::GitCmt { prompt } => {
            cli::handle_git_commit_command(&config, prompt.as_deref()).await
        }
        Commands::Gomoku => cli::handle_gomoku_command(&config).await,
        Commands::ProcessData(process_args) => {
            cli::handle_process_data_command(&config, &process_args).await
        }
        Commands::Config { output, force } => {
            cli::handle_config_command(output.as_deref(), force).await
        }
    }
}

/// `RUST_LOG` wins, then `--log-level`, then `[logging] level`.
fn init_tracing(cli_level: Option<&str>, config_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(cli_level.unwrap_or(config_level)))
        .unwrap_or_else(|_| EnvFilter::new(defaults::LOG_LEVEL));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
