use std::io;

use aicli_core::config::AicliConfig;
use aicli_core::gomoku::{BOARD_SIZE, RetryPolicy, SessionEnd, WIN_LENGTH, play_gomoku};
use anyhow::Result;
use console::style;

use super::client_for;

/// Handle the gomoku command
pub async fn handle_gomoku_command(config: &AicliConfig) -> Result<()> {
    let client = client_for(config)?;
    let policy = RetryPolicy::new(config.gomoku.oracle_max_attempts);

    println!(
        "{}",
        style(format!(
            "Gomoku: {BOARD_SIZE}x{BOARD_SIZE} board, first to {WIN_LENGTH} in a row wins. You are X, the AI is O."
        ))
        .cyan()
        .bold()
    );

    let stdin = io::stdin();
    match play_gomoku(client.as_ref(), policy, stdin.lock(), io::stdout()).await? {
        SessionEnd::Finished(_) => {}
        SessionEnd::Quit => println!("{}", style("Game abandoned.").dim()),
    }
    Ok(())
}
