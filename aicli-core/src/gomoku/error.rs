use crate::llm::provider::LLMError;

/// Errors raised while playing a game against the move oracle.
#[derive(Debug, thiserror::Error)]
pub enum GomokuError {
    #[error("invalid move notation: {0}")]
    Format(String),

    #[error("position {0} is already occupied")]
    Occupied(String),

    #[error("unexpected oracle reply: {0}")]
    Parse(String),

    #[error("move oracle failed: {0}")]
    Oracle(#[from] LLMError),

    #[error("oracle gave no playable move after {attempts} attempts (last error: {last})")]
    ExhaustedRetries {
        attempts: u32,
        last: Box<GomokuError>,
    },

    #[error("the game is already over")]
    GameOver,

    #[error("failed to serialize board: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl GomokuError {
    /// Errors a human player recovers from by entering another move.
    pub fn is_recoverable_input(&self) -> bool {
        matches!(self, GomokuError::Format(_) | GomokuError::Occupied(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_retries_display_includes_last_error() {
        let err = GomokuError::ExhaustedRetries {
            attempts: 3,
            last: Box::new(GomokuError::Occupied("H8".to_string())),
        };
        assert_eq!(
            err.to_string(),
            "oracle gave no playable move after 3 attempts (last error: position H8 is already occupied)"
        );
    }

    #[test]
    fn only_input_errors_are_recoverable() {
        assert!(GomokuError::Format("x".into()).is_recoverable_input());
        assert!(GomokuError::Occupied("A1".into()).is_recoverable_input());
        assert!(!GomokuError::Parse("x".into()).is_recoverable_input());
        assert!(!GomokuError::GameOver.is_recoverable_input());
    }
}
