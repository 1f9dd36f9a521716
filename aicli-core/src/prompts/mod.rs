//! Prompt templates and the built-in defaults for each command.

pub mod templates;

pub use templates::{PromptTemplate, TemplateError};

/// System prompt for `chat`. Field: `History`.
pub const DEFAULT_CHAT_PROMPT: &str =
    "You are a friendly chat assistant who holds natural, fluent conversations with the user.";

/// Fields: `Description`, `OS`, `Arch`.
pub const DEFAULT_GEN_CMD_PROMPT: &str = "You help people write shell commands. Based on the description below, produce one command suited to this machine and a short explanation.\nDescription: {{.Description}}\nOperating system: {{.OS}}\nArchitecture: {{.Arch}}\nReply strictly in this format:\nCMD: free -m\nExplanation: shows the current memory usage";

/// No fields.
pub const DEFAULT_JOKE_PROMPT: &str = "You tell jokes about programmers. Write one programmer joke. Reply strictly in this format: [Why do programmers confuse Halloween and Christmas? Because Oct 31 == Dec 25! In octal, 31 equals decimal 25.]";

/// Field: `Changes`.
pub const DEFAULT_GIT_COMMIT_PROMPT: &str = "You write Git commit messages. Write one concise, meaningful commit message for the changes below. Use exactly this format and only these two categories:\n\n[category] description\n\nCategories:\n- feat: a new feature\n- fix: a bug fix\n\nExamples:\n[fix] correct validation error on user login\n[feat] add user profile page\n\nChanges:\n{{.Changes}}";

/// Which command a prompt belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Chat,
    GenCmd,
    Joke,
    GitCommit,
}

impl PromptKind {
    pub fn default_template(self) -> &'static str {
        match self {
            PromptKind::Chat => DEFAULT_CHAT_PROMPT,
            PromptKind::GenCmd => DEFAULT_GEN_CMD_PROMPT,
            PromptKind::Joke => DEFAULT_JOKE_PROMPT,
            PromptKind::GitCommit => DEFAULT_GIT_COMMIT_PROMPT,
        }
    }
}

/// Pick the template source: an explicit `--prompt` wins, then the
/// configured value (which already includes environment overrides), then the
/// built-in default. Blank values are skipped.
pub fn resolve_template(kind: PromptKind, flag: Option<&str>, configured: Option<&str>) -> String {
    [flag, configured]
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
        .unwrap_or(kind.default_template())
        .to_string()
}
