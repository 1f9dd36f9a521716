/// Model ID constants
pub mod models {
    pub mod openai {
        pub const DEFAULT_MODEL: &str = "gpt-4o";
        pub const GPT_4O: &str = "gpt-4o";
        pub const GPT_4O_MINI: &str = "gpt-4o-mini";
    }

    pub mod deepseek {
        pub const DEFAULT_MODEL: &str = "deepseek-chat";
        pub const DEEPSEEK_CHAT: &str = "deepseek-chat";
        pub const DEEPSEEK_REASONER: &str = "deepseek-reasoner";
    }
}

/// Full chat-completion endpoints, not base URLs
pub mod urls {
    pub const OPENAI_CHAT_COMPLETIONS: &str = "https://api.openai.com/v1/chat/completions";
    pub const DEEPSEEK_CHAT_COMPLETIONS: &str = "https://api.deepseek.com/chat/completions";
}

/// Environment variables read on top of the configuration file
pub mod env {
    pub const PROVIDER: &str = "AICLI_PROVIDER";

    pub const OPENAI_API_KEY: &str = "AICLI_OPENAI_API_KEY";
    pub const OPENAI_API_URL: &str = "AICLI_OPENAI_API_URL";
    pub const OPENAI_MODEL: &str = "AICLI_OPENAI_MODEL";

    pub const DEEPSEEK_API_KEY: &str = "AICLI_DEEPSEEK_API_KEY";
    pub const DEEPSEEK_API_URL: &str = "AICLI_DEEPSEEK_API_URL";
    pub const DEEPSEEK_MODEL: &str = "AICLI_DEEPSEEK_MODEL";

    pub const CHAT_PROMPT: &str = "AICLI_CHAT_PROMPT";
    pub const GENCMD_PROMPT: &str = "AICLI_GENCMD_PROMPT";
    pub const JOKE_PROMPT: &str = "AICLI_JOKE_PROMPT";
    pub const GITCOMMIT_PROMPT: &str = "AICLI_GITCOMMIT_PROMPT";
}

/// Configuration file lookup
pub mod paths {
    pub const CONFIG_FILE: &str = "aicli.toml";
    pub const CONFIG_DIR: &str = ".aicli";
}

pub mod defaults {
    pub const PROVIDER: &str = "openai";
    pub const REQUEST_TIMEOUT_SECS: u64 = 120;
    pub const ORACLE_MAX_ATTEMPTS: u32 = 3;
    pub const BATCH_ROW_TIMEOUT_SECS: u64 = 60;
    pub const LOG_LEVEL: &str = "info";
    pub const CSV_OUTPUT: &str = "output.csv";
}
