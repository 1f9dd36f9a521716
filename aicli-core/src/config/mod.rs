//! aicli configuration
//!
//! Settings come from `aicli.toml` (workspace, `.aicli/`, then the home
//! directory), overlaid with `AICLI_*` environment variables and finally the
//! command-line flags. The result is an explicit [`AicliConfig`] value that is
//! handed to whatever needs it.

pub mod api_keys;
pub mod constants;
pub mod core;
pub mod error;
pub mod loader;

pub use self::core::{
    BatchConfig, EndpointConfig, GomokuConfig, LoggingConfig, PromptsConfig, ProviderConfig,
    ProviderKind, ProviderSettings,
};
pub use error::ConfigError;
pub use loader::{AicliConfig, ConfigManager};
