use crate::config::constants::defaults;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// `[gomoku]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GomokuConfig {
    /// Oracle attempts per turn before the session aborts
    #[serde(default = "default_oracle_max_attempts")]
    pub oracle_max_attempts: u32,
}

fn default_oracle_max_attempts() -> u32 {
    defaults::ORACLE_MAX_ATTEMPTS
}

impl Default for GomokuConfig {
    fn default() -> Self {
        Self {
            oracle_max_attempts: default_oracle_max_attempts(),
        }
    }
}

/// `[batch]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BatchConfig {
    /// Wall-clock deadline for one row's LLM call
    #[serde(default = "default_row_timeout_secs")]
    pub row_timeout_secs: u64,
}

fn default_row_timeout_secs() -> u64 {
    defaults::BATCH_ROW_TIMEOUT_SECS
}

impl BatchConfig {
    pub fn row_timeout(&self) -> Duration {
        Duration::from_secs(self.row_timeout_secs)
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            row_timeout_secs: default_row_timeout_secs(),
        }
    }
}

/// `[prompts]` section: template overrides for the single-shot commands
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PromptsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gen_cmd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_commit: Option<String>,
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` and `--log-level` are absent
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    defaults::LOG_LEVEL.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
