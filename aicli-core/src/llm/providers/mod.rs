pub mod deepseek;
pub mod openai;

pub use deepseek::DeepSeekProvider;
pub use openai::OpenAIProvider;
