//! `.env` loading for API keys and other `AICLI_*` variables.
//!
//! Keys are never read from the process environment directly by the LLM
//! layer; [`ConfigManager`](super::loader::ConfigManager) folds them into the
//! configuration, and clients are built from the resolved settings.

use std::path::PathBuf;

/// Load environment variables from a `.env` file in the working directory.
///
/// A missing file is fine. Any other failure is reported as a warning and
/// ignored so that a broken `.env` never prevents startup.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => Some(path),
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            eprintln!("Warning: Failed to load .env file: {}", e);
            None
        }
    }
}
