//! CLI argument parsing

use crate::config::constants::defaults;
use anyhow::{Result, bail};
use clap::{Args, ColorChoice, Parser, Subcommand, ValueEnum, ValueHint};
use std::path::PathBuf;

/// Main CLI structure for acl
#[derive(Parser, Debug)]
#[command(
    name = "acl",
    version,
    about = "Command-line assistant backed by OpenAI-compatible LLMs\n\nQuick Start:\n  export AICLI_OPENAI_API_KEY=\"your_key\"\n  acl chat",
    color = ColorChoice::Auto
)]
pub struct Cli {
    /// **LLM Provider**
    ///
    /// Available providers:
    ///   • openai - OpenAI GPT models (default)
    ///   • deepseek - DeepSeek models
    #[arg(long, global = true)]
    pub provider: Option<String>,

    /// Model ID for the active provider, e.g. gpt-4o or deepseek-chat
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Configuration file to use instead of searching for aicli.toml
    #[arg(long, global = true, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Log filter (error, warn, info, debug, trace); `RUST_LOG` takes precedence
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// **Interactive chat** that keeps the conversation history
    ///
    /// Type 'exit' or 'quit' to leave.
    ///
    /// Usage: acl chat
    Chat {
        /// Custom system prompt template
        #[arg(short = 't', long)]
        prompt: Option<String>,
    },

    /// **Generate a shell command** from a description
    ///
    /// Example: acl gen-cmd "total size of files in this directory"
    GenCmd {
        /// What the command should do
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,

        /// Custom prompt template (fields: Description, OS, Arch)
        #[arg(short = 't', long)]
        prompt: Option<String>,
    },

    /// **Tell a programmer joke**
    Joke {
        /// Custom prompt template
        #[arg(short = 't', long)]
        prompt: Option<String>,
    },

    /// **Write a commit message** for the current changes, edit it, then commit
    ///
    /// Runs `git add .` and `git commit` after confirmation.
    #[command(name = "git-cmt")]
    GitCmt {
        /// Custom prompt template (field: Changes)
        #[arg(short = 't', long)]
        prompt: Option<String>,
    },

    /// **Play five-in-a-row** against the model on a 15x15 board
    ///
    /// Enter moves as a row letter and column number, e.g. H8.
    Gomoku,

    /// **Batch-process rows** from a CSV file or a SQLite table through the model
    ///
    /// Each row needs id, content, prompt and result columns. The reply is
    /// written to the result column.
    ///
    /// Examples:
    ///   acl process-data -f in.csv -o out.csv
    ///   acl process-data --source db --db-path jobs.db --db-table jobs -p "Summarize {{.Content}}"
    ProcessData(ProcessDataArgs),

    /// **Generate a configuration file** with every default filled in
    ///
    /// Prints to stdout unless --output is given.
    Config {
        /// Where to write the file, e.g. aicli.toml
        #[arg(long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Where `process-data` reads its rows from
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DataSource {
    Csv,
    Db,
}

#[derive(Debug, Args)]
pub struct ProcessDataArgs {
    /// Row source: csv or db
    #[arg(short = 's', long, value_enum, default_value_t = DataSource::Csv)]
    pub source: DataSource,

    /// CSV input file (source csv)
    #[arg(short = 'f', long, value_hint = ValueHint::FilePath)]
    pub csv_file: Option<PathBuf>,

    /// CSV output file (source csv)
    #[arg(short = 'o', long, default_value = defaults::CSV_OUTPUT, value_hint = ValueHint::FilePath)]
    pub csv_out: PathBuf,

    /// SQLite database file (source db)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub db_path: Option<PathBuf>,

    /// Table holding the rows (source db)
    #[arg(long)]
    pub db_table: Option<String>,

    /// Global prompt template (field: Content); rows use their own prompt column when absent
    #[arg(short = 'p', long)]
    pub prompt: Option<String>,
}

/// Resolved input and output of a `process-data` run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchTarget {
    Csv { input: PathBuf, output: PathBuf },
    Db { path: PathBuf, table: String },
}

impl ProcessDataArgs {
    /// Check that the flags the chosen source needs are present.
    pub fn target(&self) -> Result<BatchTarget> {
        match self.source {
            DataSource::Csv => {
                let Some(input) = &self.csv_file else {
                    bail!("--csv-file is required when --source is csv");
                };
                Ok(BatchTarget::Csv {
                    input: input.clone(),
                    output: self.csv_out.clone(),
                })
            }
            DataSource::Db => match (&self.db_path, &self.db_table) {
                (Some(path), Some(table)) if !table.trim().is_empty() => Ok(BatchTarget::Db {
                    path: path.clone(),
                    table: table.trim().to_string(),
                }),
                _ => bail!("--db-path and --db-table are required when --source is db"),
            },
        }
    }
}
