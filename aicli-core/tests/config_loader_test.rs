//! Configuration file discovery and parsing.

use aicli_core::config::{AicliConfig, ConfigManager, ProviderKind};
use std::fs;
use tempfile::TempDir;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_file_is_loaded() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("aicli.toml"),
            r#"
[provider]
name = "deepseek"
timeout_secs = 30

[provider.deepseek]
api_key = "sk-file"
model = "deepseek-reasoner"

[prompts]
joke = "Tell a short pun"

[batch]
row_timeout_secs = 15
"#,
        )
        .unwrap();

        let manager = ConfigManager::load_from_workspace(dir.path()).unwrap();
        assert_eq!(manager.config_path(), Some(dir.path().join("aicli.toml").as_path()));

        let config = manager.config();
        assert_eq!(config.prompts.joke.as_deref(), Some("Tell a short pun"));
        assert_eq!(config.batch.row_timeout_secs, 15);
        assert_eq!(config.gomoku.oracle_max_attempts, 3);

        let settings = config.provider.resolve().unwrap();
        assert_eq!(settings.kind, ProviderKind::DeepSeek);
        assert_eq!(settings.api_key, "sk-file");
        assert_eq!(settings.model, "deepseek-reasoner");
        assert_eq!(settings.endpoint, "https://api.deepseek.com/chat/completions");
        assert_eq!(settings.timeout.as_secs(), 30);
    }

    #[test]
    fn test_workspace_root_wins_over_dot_directory() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".aicli")).unwrap();
        fs::write(
            dir.path().join(".aicli").join("aicli.toml"),
            "[gomoku]\noracle_max_attempts = 7\n",
        )
        .unwrap();

        let manager = ConfigManager::load_from_workspace(dir.path()).unwrap();
        assert_eq!(manager.config().gomoku.oracle_max_attempts, 7);

        fs::write(
            dir.path().join("aicli.toml"),
            "[gomoku]\noracle_max_attempts = 2\n",
        )
        .unwrap();
        let manager = ConfigManager::load_from_workspace(dir.path()).unwrap();
        assert_eq!(manager.config().gomoku.oracle_max_attempts, 2);
    }

    #[test]
    fn test_candidate_order() {
        let dir = TempDir::new().unwrap();
        let candidates = ConfigManager::candidate_paths(dir.path());
        assert_eq!(candidates[0], dir.path().join("aicli.toml"));
        assert_eq!(candidates[1], dir.path().join(".aicli").join("aicli.toml"));
    }

    #[test]
    fn test_invalid_toml_reports_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[provider\nname = ").unwrap();

        let err = ConfigManager::load_from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_sample_config_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample.toml");
        AicliConfig::create_sample_config(&path).unwrap();

        let manager = ConfigManager::load_from_file(&path).unwrap();
        assert_eq!(manager.config(), &AicliConfig::default());
    }
}
