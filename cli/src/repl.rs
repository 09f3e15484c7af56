//! Interactive REPL loop: read stdin, answer, print, repeat until EOF or quit.
//!
//! Used when `-i/--interactive` is passed. The transcript lives in a [`Conversation`] so each
//! turn sees the previous ones.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use cli::{is_quit_command, CliError, Conversation};
use market_rag::RagService;

/// Prompts, reads a line, answers it, repeats.
///
/// Exits on EOF (Ctrl+D) or `quit`/`exit`/`/quit`; empty lines are skipped.
/// A failed turn is printed to stderr and the loop continues.
pub async fn run_repl_loop(
    service: &RagService,
    conversation: &mut Conversation,
) -> Result<(), CliError> {
    let mut reader = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let line = match reader.next_line().await? {
            None => break,
            Some(s) if s.trim().is_empty() => continue,
            Some(s) if is_quit_command(&s) => break,
            Some(s) => s,
        };

        match conversation.ask(service, line.trim()).await {
            Ok(answer) => println!("{}", answer),
            Err(e) => eprintln!("error: {}", e),
        }
    }

    println!("Bye.");
    Ok(())
}
