//! End-to-end gomoku sessions against a scripted move oracle.

mod common;

use std::io::Cursor;

use aicli_core::gomoku::{
    GameOutcome, GomokuError, GomokuSession, Position, RetryPolicy, SessionEnd, Side,
};
use common::{ScriptedClient, oracle_reply};

fn run_output(out: Vec<u8>) -> String {
    console::strip_ansi_codes(&String::from_utf8(out).unwrap()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_human_wins_with_five_in_a_row() {
        let client = ScriptedClient::new(["O15", "O14", "O13", "O12"].map(oracle_reply));
        let mut session = GomokuSession::new(&client, RetryPolicy::default());
        let input = Cursor::new("A1\nA2\nA3\nA4\nA5\n");
        let mut out = Vec::new();

        let end = session.run(input, &mut out).await.unwrap();

        assert_eq!(end, SessionEnd::Finished(GameOutcome::Winner(Side::Human)));
        assert_eq!(session.state().move_count(), 9);
        assert_eq!(client.prompts().len(), 4);
        let output = run_output(out);
        assert!(output.contains("You win!"));
        assert!(output.contains("AI plays O15"));
    }

    #[tokio::test]
    async fn test_oracle_wins() {
        let client = ScriptedClient::new(["H1", "H2", "H3", "H4", "H5"].map(oracle_reply));
        let mut session = GomokuSession::new(&client, RetryPolicy::default());
        let input = Cursor::new("A1\nA3\nA5\nA7\nA9\n");
        let mut out = Vec::new();

        let end = session.run(input, &mut out).await.unwrap();

        assert_eq!(end, SessionEnd::Finished(GameOutcome::Winner(Side::Oracle)));
        assert!(run_output(out).contains("The AI wins!"));
    }

    #[tokio::test]
    async fn test_oracle_retries_after_occupied_target() {
        let client = ScriptedClient::new([oracle_reply("H8"), oracle_reply("H9")]);
        let mut session = GomokuSession::new(&client, RetryPolicy::default());
        let input = Cursor::new("H8\nexit\n");
        let mut out = Vec::new();

        let end = session.run(input, &mut out).await.unwrap();

        assert_eq!(end, SessionEnd::Quit);
        assert_eq!(session.state().move_count(), 2);
        assert_eq!(client.prompts().len(), 2);
        // The board sent to the oracle lists the human stone
        assert!(client.prompts()[0].contains("\"row\": \"H\""));
        let board = session.state().board();
        let h9 = Position::new(7, 8);
        assert!(board.get(h9.row, h9.col).is_some_and(|cell| cell.symbol() == 'O'));
    }

    #[tokio::test]
    async fn test_exhausted_retries_abort_the_session() {
        let client = ScriptedClient::new(["I'd rather not", "reason: hmm", "path: Z99\nreason: x"]);
        let mut session = GomokuSession::new(&client, RetryPolicy::new(3));
        let input = Cursor::new("H8\n");
        let mut out = Vec::new();

        let err = session.run(input, &mut out).await.unwrap_err();

        match err.downcast_ref::<GomokuError>() {
            Some(GomokuError::ExhaustedRetries { attempts, last }) => {
                assert_eq!(*attempts, 3);
                assert!(matches!(**last, GomokuError::Parse(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(client.prompts().len(), 3);
        assert!(run_output(out).contains("AI error"));
    }

    #[tokio::test]
    async fn test_oracle_network_errors_count_against_the_budget() {
        let client = ScriptedClient::from_results([
            Err(aicli_core::LLMError::Timeout(5)),
            Ok(oracle_reply("A1")),
        ]);
        let mut session = GomokuSession::new(&client, RetryPolicy::new(2));
        let input = Cursor::new("H8\nquit\n");
        let mut out = Vec::new();

        assert_eq!(session.run(input, &mut out).await.unwrap(), SessionEnd::Quit);
        assert_eq!(session.state().move_count(), 2);
    }

    #[tokio::test]
    async fn test_bad_human_input_reprompts() {
        let client = ScriptedClient::new(Vec::<String>::new());
        let mut session = GomokuSession::new(&client, RetryPolicy::default());
        let input = Cursor::new("Z99\nhello\nEXIT\n");
        let mut out = Vec::new();

        let end = session.run(input, &mut out).await.unwrap();

        assert_eq!(end, SessionEnd::Quit);
        assert_eq!(session.state().move_count(), 0);
        assert!(client.prompts().is_empty());
        let output = run_output(out);
        assert_eq!(output.matches("please try again").count(), 2);
    }

    #[tokio::test]
    async fn test_end_of_input_quits() {
        let client = ScriptedClient::new(Vec::<String>::new());
        let mut session = GomokuSession::new(&client, RetryPolicy::default());
        let mut out = Vec::new();

        let end = session.run(Cursor::new(""), &mut out).await.unwrap();
        assert_eq!(end, SessionEnd::Quit);
    }
}
