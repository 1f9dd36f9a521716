//! Five-in-a-row against an LLM.
//!
//! - [`board`]: the 15x15 grid, win detection, rendering and serialization
//! - [`notation`]: `H8`-style move codec
//! - [`state`]: turn order and terminal states
//! - [`oracle`]: prompting, reply parsing and the retry policy
//! - [`session`]: the interactive terminal loop

pub mod board;
pub mod error;
pub mod notation;
pub mod oracle;
pub mod session;
pub mod state;

pub use board::{BOARD_SIZE, Board, Cell, StonePosition, WIN_LENGTH};
pub use error::GomokuError;
pub use notation::{Position, parse_move};
pub use oracle::{
    OracleMoveResolver, OracleReply, OracleTurn, RetryPolicy, build_oracle_prompt,
    parse_oracle_reply,
};
pub use session::{GomokuSession, SessionEnd, play_gomoku};
pub use state::{GameOutcome, GameState, Move, Side};
