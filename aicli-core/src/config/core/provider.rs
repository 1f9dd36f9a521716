use crate::config::constants::{defaults, env, models, urls};
use crate::config::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Supported chat-completion backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderKind {
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "deepseek")]
    DeepSeek,
}

impl ProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::DeepSeek => "deepseek",
        }
    }

    /// Environment variable holding this provider's API key
    pub fn api_key_env(self) -> &'static str {
        match self {
            ProviderKind::OpenAI => env::OPENAI_API_KEY,
            ProviderKind::DeepSeek => env::DEEPSEEK_API_KEY,
        }
    }

    pub fn default_endpoint(self) -> &'static str {
        match self {
            ProviderKind::OpenAI => urls::OPENAI_CHAT_COMPLETIONS,
            ProviderKind::DeepSeek => urls::DEEPSEEK_CHAT_COMPLETIONS,
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            ProviderKind::OpenAI => models::openai::DEFAULT_MODEL,
            ProviderKind::DeepSeek => models::deepseek::DEFAULT_MODEL,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAI),
            "deepseek" => Ok(ProviderKind::DeepSeek),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

/// Per-provider connection settings; unset fields fall back to the provider's defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EndpointConfig {
    /// API key; the provider's environment variable takes precedence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Full chat-completions URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// `[provider]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Active provider (`openai` or `deepseek`)
    #[serde(default = "default_provider_name")]
    pub name: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub openai: EndpointConfig,

    #[serde(default)]
    pub deepseek: EndpointConfig,
}

fn default_provider_name() -> String {
    defaults::PROVIDER.to_string()
}
fn default_timeout_secs() -> u64 {
    defaults::REQUEST_TIMEOUT_SECS
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: default_provider_name(),
            timeout_secs: default_timeout_secs(),
            openai: EndpointConfig::default(),
            deepseek: EndpointConfig::default(),
        }
    }
}

/// Fully resolved settings a client is constructed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
}

impl ProviderConfig {
    pub fn kind(&self) -> Result<ProviderKind, ConfigError> {
        self.name.parse()
    }

    pub fn endpoint_config(&self, kind: ProviderKind) -> &EndpointConfig {
        match kind {
            ProviderKind::OpenAI => &self.openai,
            ProviderKind::DeepSeek => &self.deepseek,
        }
    }

    pub fn endpoint_config_mut(&mut self, kind: ProviderKind) -> &mut EndpointConfig {
        match kind {
            ProviderKind::OpenAI => &mut self.openai,
            ProviderKind::DeepSeek => &mut self.deepseek,
        }
    }

    /// Override the model of the active provider
    pub fn set_model(&mut self, model: impl Into<String>) -> Result<(), ConfigError> {
        let kind = self.kind()?;
        self.endpoint_config_mut(kind).model = Some(model.into());
        Ok(())
    }

    /// Resolve the active provider into client settings.
    ///
    /// Fails when the provider is unknown or has no API key.
    pub fn resolve(&self) -> Result<ProviderSettings, ConfigError> {
        let kind = self.kind()?;
        let endpoint = self.endpoint_config(kind);

        let api_key = non_blank(endpoint.api_key.as_deref()).ok_or(ConfigError::MissingApiKey {
            provider: kind,
            env_var: kind.api_key_env(),
        })?;

        Ok(ProviderSettings {
            kind,
            api_key: api_key.to_string(),
            endpoint: non_blank(endpoint.base_url.as_deref())
                .unwrap_or(kind.default_endpoint())
                .to_string(),
            model: non_blank(endpoint.model.as_deref())
                .unwrap_or(kind.default_model())
                .to_string(),
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_names_parse_case_insensitively() {
        assert_eq!("OpenAI".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAI);
        assert_eq!(" deepseek ".parse::<ProviderKind>().unwrap(), ProviderKind::DeepSeek);
        assert!(matches!(
            "gemini".parse::<ProviderKind>(),
            Err(ConfigError::UnknownProvider(name)) if name == "gemini"
        ));
    }

    #[test]
    fn resolve_fills_provider_defaults() {
        let mut config = ProviderConfig::default();
        config.name = "deepseek".to_string();
        config.deepseek.api_key = Some("sk-test".to_string());

        let settings = config.resolve().unwrap();
        assert_eq!(settings.kind, ProviderKind::DeepSeek);
        assert_eq!(settings.endpoint, urls::DEEPSEEK_CHAT_COMPLETIONS);
        assert_eq!(settings.model, models::deepseek::DEFAULT_MODEL);
        assert_eq!(settings.timeout, Duration::from_secs(120));
    }

    #[test]
    fn missing_key_names_the_env_var() {
        let mut config = ProviderConfig::default();
        config.openai.api_key = Some("   ".to_string());

        let err = config.resolve().unwrap_err();
        assert!(err.to_string().contains("AICLI_OPENAI_API_KEY"));
    }

    #[test]
    fn model_override_targets_active_provider() {
        let mut config = ProviderConfig::default();
        config.set_model("gpt-4o-mini").unwrap();
        assert_eq!(config.openai.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(config.deepseek.model, None);
    }
}
