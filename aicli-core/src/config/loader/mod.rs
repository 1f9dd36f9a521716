use crate::config::api_keys;
use crate::config::constants::{env, paths};
use crate::config::core::{
    BatchConfig, GomokuConfig, LoggingConfig, PromptsConfig, ProviderConfig, ProviderKind,
};
use crate::config::error::ConfigError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure for aicli
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AicliConfig {
    /// Active provider and per-provider connection settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Prompt template overrides
    #[serde(default)]
    pub prompts: PromptsConfig,

    /// Gomoku oracle settings
    #[serde(default)]
    pub gomoku: GomokuConfig,

    /// Batch processing settings
    #[serde(default)]
    pub batch: BatchConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AicliConfig {
    /// Overlay `AICLI_*` variables. Blank values are ignored.
    ///
    /// `lookup` is usually `|key| std::env::var(key).ok()`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(name) = get(env::PROVIDER) {
            self.provider.name = name;
        }

        let endpoints = [
            (
                ProviderKind::OpenAI,
                env::OPENAI_API_KEY,
                env::OPENAI_API_URL,
                env::OPENAI_MODEL,
            ),
            (
                ProviderKind::DeepSeek,
                env::DEEPSEEK_API_KEY,
                env::DEEPSEEK_API_URL,
                env::DEEPSEEK_MODEL,
            ),
        ];
        for (kind, key_var, url_var, model_var) in endpoints {
            let endpoint = self.provider.endpoint_config_mut(kind);
            if let Some(key) = get(key_var) {
                endpoint.api_key = Some(key);
            }
            if let Some(url) = get(url_var) {
                endpoint.base_url = Some(url);
            }
            if let Some(model) = get(model_var) {
                endpoint.model = Some(model);
            }
        }

        let prompts = [
            (env::CHAT_PROMPT, &mut self.prompts.chat),
            (env::GENCMD_PROMPT, &mut self.prompts.gen_cmd),
            (env::JOKE_PROMPT, &mut self.prompts.joke),
            (env::GITCOMMIT_PROMPT, &mut self.prompts.git_commit),
        ];
        for (var, slot) in prompts {
            if let Some(template) = get(var) {
                *slot = Some(template);
            }
        }
    }

    /// Apply `--provider` / `--model` flags
    pub fn apply_cli_overrides(
        &mut self,
        provider: Option<&str>,
        model: Option<&str>,
    ) -> Result<(), ConfigError> {
        if let Some(provider) = provider {
            self.provider.name = provider.to_string();
        }
        if let Some(model) = model {
            self.provider.set_model(model)?;
        }
        Ok(())
    }

    /// Check value ranges. API keys are checked later, when a client is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.provider.kind()?;

        if self.provider.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "provider.timeout_secs",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.gomoku.oracle_max_attempts == 0 {
            return Err(ConfigError::Invalid {
                field: "gomoku.oracle_max_attempts",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.batch.row_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "batch.row_timeout_secs",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Default configuration rendered as TOML
    pub fn sample_config() -> Result<String> {
        toml::to_string_pretty(&AicliConfig::default())
            .context("Failed to serialize default configuration")
    }

    /// Create sample configuration file
    pub fn create_sample_config<P: AsRef<Path>>(output: P) -> Result<()> {
        let output = output.as_ref();
        let config_content = Self::sample_config()?;

        fs::write(output, config_content)
            .with_context(|| format!("Failed to write config file: {}", output.display()))?;

        Ok(())
    }
}

/// Configuration manager for loading and validating configurations
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: AicliConfig,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Load `.env`, the first config file found from the current directory,
    /// and the environment overrides.
    ///
    /// Nothing is validated here: CLI flags are applied on top first, and the
    /// caller runs [`AicliConfig::validate`] on the merged result.
    pub fn load() -> Result<Self> {
        Self::bootstrap(None)
    }

    /// Like [`ConfigManager::load`], with an explicit file taking the place of the search.
    pub fn bootstrap(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = api_keys::load_dotenv() {
            debug!(path = %path.display(), "loaded .env");
        }

        Self::from_sources(explicit, std::env::current_dir()?, |key| {
            std::env::var(key).ok()
        })
    }

    /// File layer plus environment layer, with the environment read through `lookup`.
    pub fn from_sources<F>(
        explicit: Option<&Path>,
        workspace: impl AsRef<Path>,
        lookup: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut manager = match explicit {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load_from_workspace(workspace)?,
        };
        manager.config.apply_env_overrides(lookup);
        Ok(manager)
    }

    /// Get the user's home directory path
    fn get_home_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            return Some(PathBuf::from(home));
        }

        if let Ok(userprofile) = std::env::var("USERPROFILE") {
            return Some(PathBuf::from(userprofile));
        }

        dirs::home_dir()
    }

    /// Config files in lookup order for a workspace
    pub fn candidate_paths(workspace: impl AsRef<Path>) -> Vec<PathBuf> {
        let workspace = workspace.as_ref();
        let mut candidates = vec![
            workspace.join(paths::CONFIG_FILE),
            workspace.join(paths::CONFIG_DIR).join(paths::CONFIG_FILE),
        ];
        if let Some(home_dir) = Self::get_home_dir() {
            candidates.push(home_dir.join(paths::CONFIG_DIR).join(paths::CONFIG_FILE));
        }
        candidates
    }

    /// Load configuration from a specific workspace, falling back to defaults
    pub fn load_from_workspace(workspace: impl AsRef<Path>) -> Result<Self> {
        for candidate in Self::candidate_paths(workspace) {
            if candidate.exists() {
                return Self::load_from_file(&candidate);
            }
        }

        Ok(Self {
            config: AicliConfig::default(),
            config_path: None,
        })
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: AicliConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(Self {
            config,
            config_path: Some(path.to_path_buf()),
        })
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &AicliConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut AicliConfig {
        &mut self.config
    }

    pub fn into_config(self) -> AicliConfig {
        self.config
    }

    /// Get the configuration file path (if loaded from file)
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config: AicliConfig = toml::from_str(
            r#"
            [provider]
            name = "deepseek"

            [gomoku]
            oracle_max_attempts = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.provider.name, "deepseek");
        assert_eq!(config.provider.timeout_secs, 120);
        assert_eq!(config.gomoku.oracle_max_attempts, 5);
        assert_eq!(config.batch.row_timeout_secs, 60);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn env_overrides_fill_keys_and_prompts() {
        let mut config = AicliConfig::default();
        config.apply_env_overrides(lookup(&[
            ("AICLI_PROVIDER", "deepseek"),
            ("AICLI_DEEPSEEK_API_KEY", "sk-ds"),
            ("AICLI_DEEPSEEK_MODEL", "deepseek-reasoner"),
            ("AICLI_JOKE_PROMPT", "Tell a pun"),
            ("AICLI_OPENAI_API_URL", "  "),
        ]));

        assert_eq!(config.provider.name, "deepseek");
        assert_eq!(config.provider.deepseek.api_key.as_deref(), Some("sk-ds"));
        assert_eq!(config.prompts.joke.as_deref(), Some("Tell a pun"));
        assert_eq!(config.provider.openai.base_url, None);

        let settings = config.provider.resolve().unwrap();
        assert_eq!(settings.model, "deepseek-reasoner");
    }

    #[test]
    fn cli_overrides_win() {
        let mut config = AicliConfig::default();
        config
            .apply_cli_overrides(Some("deepseek"), Some("deepseek-reasoner"))
            .unwrap();
        assert_eq!(
            config.provider.deepseek.model.as_deref(),
            Some("deepseek-reasoner")
        );

        let err = config.apply_cli_overrides(Some("nope"), Some("m")).unwrap_err();
        assert_eq!(err, ConfigError::UnknownProvider("nope".to_string()));
    }

    #[test]
    fn provider_flag_repairs_a_bad_env_provider() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut manager = ConfigManager::from_sources(
            None,
            dir.path(),
            lookup(&[("AICLI_PROVIDER", "bogus")]),
        )
        .unwrap();
        assert_eq!(manager.config().provider.name, "bogus");
        assert!(manager.config().validate().is_err());

        manager
            .config_mut()
            .apply_cli_overrides(Some("openai"), None)
            .unwrap();
        assert!(manager.config().validate().is_ok());
    }

    #[test]
    fn explicit_file_with_bad_provider_still_loads() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[provider]\nname = \"nope\"\n").unwrap();

        let mut manager = ConfigManager::from_sources(Some(&path), dir.path(), lookup(&[])).unwrap();
        assert_eq!(manager.config_path(), Some(path.as_path()));
        manager
            .config_mut()
            .apply_cli_overrides(Some("deepseek"), None)
            .unwrap();
        assert!(manager.config().validate().is_ok());
    }

    #[test]
    fn validation_rejects_zero_bounds() {
        let mut config = AicliConfig::default();
        assert!(config.validate().is_ok());

        config.gomoku.oracle_max_attempts = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "gomoku.oracle_max_attempts", .. })
        ));

        config.gomoku.oracle_max_attempts = 1;
        config.batch.row_timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
