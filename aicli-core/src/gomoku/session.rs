use std::io::{BufRead, Write};

use anyhow::Result;
use console::style;
use tracing::debug;

use super::notation::parse_move;
use super::oracle::{OracleMoveResolver, RetryPolicy};
use super::state::{GameOutcome, GameState, Side};
use crate::llm::LLMClient;

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Finished(GameOutcome),
    Quit,
}

fn is_quit_command(line: &str) -> bool {
    let lowered = line.trim().to_ascii_lowercase();
    lowered == "exit" || lowered == "quit"
}

/// Terminal game loop: the human types moves, the oracle answers.
///
/// Bad notation and occupied cells re-prompt the human indefinitely. An
/// oracle that exhausts its retry budget ends the session with an error.
pub struct GomokuSession<'a> {
    state: GameState,
    resolver: OracleMoveResolver<'a>,
}

impl<'a> GomokuSession<'a> {
    pub fn new(client: &'a dyn LLMClient, policy: RetryPolicy) -> Self {
        Self {
            state: GameState::new(),
            resolver: OracleMoveResolver::new(client, policy),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub async fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> Result<SessionEnd> {
        loop {
            write!(out, "{}", self.state.board().render())?;

            let outcome = match self.state.turn() {
                Side::Human => {
                    write!(
                        out,
                        "Your turn (X). Enter a move such as 'H8', or 'exit' to quit: "
                    )?;
                    out.flush()?;

                    let mut line = String::new();
                    if input.read_line(&mut line)? == 0 {
                        writeln!(out)?;
                        return Ok(SessionEnd::Quit);
                    }
                    if is_quit_command(&line) {
                        writeln!(out, "Game over. Goodbye!")?;
                        return Ok(SessionEnd::Quit);
                    }

                    match parse_move(&line).and_then(|pos| self.state.play(pos).map(|o| (pos, o))) {
                        Ok((pos, outcome)) => {
                            debug!(position = %pos, "human move");
                            outcome
                        }
                        Err(err) if err.is_recoverable_input() => {
                            writeln!(out, "{}", style(format!("{err}, please try again.")).yellow())?;
                            continue;
                        }
                        Err(err) => return Err(err.into()),
                    }
                }
                Side::Oracle => {
                    writeln!(out, "AI (O) is thinking...")?;
                    out.flush()?;

                    match self.resolver.play_turn(&mut self.state).await {
                        Ok(turn) => {
                            writeln!(out, "AI plays {}", turn.position)?;
                            writeln!(out, "AI's reasoning: {}", turn.reason)?;
                            turn.outcome
                        }
                        Err(err) => {
                            writeln!(out, "{}", style(format!("AI error: {err}")).red())?;
                            return Err(err.into());
                        }
                    }
                }
            };

            if let Some(outcome) = outcome {
                write!(out, "{}", self.state.board().render())?;
                let banner = match outcome {
                    GameOutcome::Winner(Side::Human) => "🎉 You win! 🎉",
                    GameOutcome::Winner(Side::Oracle) => "😞 The AI wins!",
                    GameOutcome::Draw => "It's a draw!",
                };
                writeln!(out, "{banner}")?;
                return Ok(SessionEnd::Finished(outcome));
            }
        }
    }
}

/// Convenience wrapper used by the CLI.
pub async fn play_gomoku<R: BufRead, W: Write>(
    client: &dyn LLMClient,
    policy: RetryPolicy,
    input: R,
    out: W,
) -> Result<SessionEnd> {
    GomokuSession::new(client, policy).run(input, out).await
}
