pub mod features;
pub mod provider;

pub use features::{BatchConfig, GomokuConfig, LoggingConfig, PromptsConfig};
pub use provider::{EndpointConfig, ProviderConfig, ProviderKind, ProviderSettings};
