//! Move selection by prompting an LLM.
//!
//! The oracle sees only the occupied cells, as produced by
//! [`Board::serialize_positions`](super::board::Board::serialize_positions),
//! and must answer with a `reason:` line and a `path:` line. Replies that
//! cannot be parsed or that target an occupied cell are retried up to
//! [`RetryPolicy::max_attempts`] times; after that the game is aborted.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use super::board::BOARD_SIZE;
use super::error::GomokuError;
use super::notation::{Position, last_row_letter, parse_move};
use super::state::{GameOutcome, GameState, Side};
use crate::config::constants::defaults;
use crate::llm::LLMClient;
use crate::prompts::PromptTemplate;

const ORACLE_PROMPT: &str = r#"You are playing Gomoku (five in a row) with the stone 'O' against a human playing 'X' on a 15x15 board. Rows are labelled A to O and columns 1 to 15.

Only occupied cells are listed below; every other cell is empty:
{{.Board}}

Rebuild the full board from this list, then choose your next move using these rules, in order:
1. Block the opponent: if 'X' threatens to connect five along any row, column or diagonal, stop it. To block a diagonal, play on that diagonal.
2. Attack: if you can extend your own 'O' stones towards five, take that chance.
3. Position: prefer the centre and other strategically strong cells that open future lines.
4. Anticipate: predict the opponent's next move and prepare your defence or attack.

You may only choose an empty cell. Reply in exactly this format and nothing else:

reason: why you chose this move
path: H8"#;

static REASON_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(?i)reason:\s*(.*)").ok());

static PATH_RE: Lazy<Option<Regex>> = Lazy::new(|| {
    let pattern = format!(
        r"(?i)path:\s*([A-{last}](?:1[0-{max_teen}]|[1-9]))\b",
        last = last_row_letter(),
        max_teen = BOARD_SIZE - 10,
    );
    Regex::new(&pattern).ok()
});

/// How many times the oracle is asked before the game is abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(defaults::ORACLE_MAX_ATTEMPTS)
    }
}

/// A parsed oracle answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleReply {
    pub reason: String,
    pub position: Position,
}

/// The oracle's accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleTurn {
    pub position: Position,
    pub reason: String,
    pub outcome: Option<GameOutcome>,
    pub attempts: u32,
}

pub fn build_oracle_prompt(board_json: &str) -> Result<String, GomokuError> {
    let template = PromptTemplate::parse(ORACLE_PROMPT)
        .map_err(|err| GomokuError::Parse(err.to_string()))?;
    template
        .render_pairs(&[("Board", board_json)])
        .map_err(|err| GomokuError::Parse(err.to_string()))
}

/// Extract `reason` and `path` from an oracle reply.
pub fn parse_oracle_reply(reply: &str) -> Result<OracleReply, GomokuError> {
    let (Some(reason_re), Some(path_re)) = (REASON_RE.as_ref(), PATH_RE.as_ref()) else {
        return Err(GomokuError::Parse("reply patterns failed to compile".to_string()));
    };

    let reason = reason_re
        .captures(reply)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string());
    let path = path_re
        .captures(reply)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string());

    match (reason, path) {
        (Some(reason), Some(path)) => Ok(OracleReply {
            reason,
            position: parse_move(&path)?,
        }),
        _ => Err(GomokuError::Parse(format!(
            "expected 'reason:' and 'path:' lines, got: {}",
            reply.trim()
        ))),
    }
}

pub struct OracleMoveResolver<'a> {
    client: &'a dyn LLMClient,
    policy: RetryPolicy,
}

impl<'a> OracleMoveResolver<'a> {
    pub fn new(client: &'a dyn LLMClient, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Ask the oracle for a move and play it on `game`.
    pub async fn play_turn(&self, game: &mut GameState) -> Result<OracleTurn, GomokuError> {
        if game.is_terminal() {
            return Err(GomokuError::GameOver);
        }
        if game.turn() != Side::Oracle {
            return Err(GomokuError::Format("it is not the oracle's turn".to_string()));
        }

        let mut last_error = None;
        for attempt in 1..=self.policy.max_attempts {
            match self.attempt(game).await {
                Ok((reply, outcome)) => {
                    debug!(
                        attempt,
                        position = %reply.position,
                        reason = %reply.reason,
                        "oracle move accepted"
                    );
                    return Ok(OracleTurn {
                        position: reply.position,
                        reason: reply.reason,
                        outcome,
                        attempts: attempt,
                    });
                }
                Err(err) => {
                    warn!(attempt, error = %err, "oracle attempt failed");
                    last_error = Some(err);
                }
            }
        }

        Err(GomokuError::ExhaustedRetries {
            attempts: self.policy.max_attempts,
            last: Box::new(last_error.unwrap_or(GomokuError::Parse("no attempt made".into()))),
        })
    }

    async fn attempt(
        &self,
        game: &mut GameState,
    ) -> Result<(OracleReply, Option<GameOutcome>), GomokuError> {
        let board_json = game.board().serialize_positions()?;
        let prompt = build_oracle_prompt(&board_json)?;
        let response = self.client.generate(&prompt).await?;
        debug!(reply = %response.content, "oracle reply");

        let reply = parse_oracle_reply(&response.content)?;
        let outcome = game.play(reply.position)?;
        Ok((reply, outcome))
    }
}
