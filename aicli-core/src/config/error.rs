use super::core::ProviderKind;

/// Configuration problems detected after parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown provider '{0}' (expected 'openai' or 'deepseek')")]
    UnknownProvider(String),

    #[error("no API key configured for {provider}; set {env_var} or [provider.{provider}] api_key")]
    MissingApiKey {
        provider: ProviderKind,
        env_var: &'static str,
    },

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
