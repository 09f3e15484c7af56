//! market-rag CLI binary: ask questions about the 2024 stock market.
//!
//! One-shot: `market-rag "What stocks are listed on NASDAQ?"`. Interactive: `market-rag -i`.

mod repl;

use std::path::PathBuf;

use clap::Parser;
use cli::{resolve_message, CliError, Conversation};
use config::LoggingOptions;
use market_rag::{RagConfig, RagService};
use repl::run_repl_loop;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "market-rag")]
#[command(about = "market-rag: answer stock market questions with retrieval")]
struct Args {
    /// Question (or pass as positional arguments)
    #[arg(short, long, value_name = "TEXT")]
    message: Option<String>,

    /// Positional args: question when -m/--message is not used
    #[arg(trailing_var_arg = true)]
    rest: Vec<String>,

    /// Interactive REPL: after the first answer (if any), keep asking and keep history
    #[arg(short, long)]
    interactive: bool,

    /// Verbose: console logs at debug level (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,

    /// Debug log file, truncated on every run
    #[arg(long, value_name = "PATH", env = "RAG_LOG_FILE")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    config::load_and_apply("market-rag", None)?;
    let args = Args::parse();
    let _log_guard = config::init_tracing(&LoggingOptions {
        verbose: args.verbose,
        log_file: args.log_file.clone(),
    })?;

    let message = resolve_message(args.message, &args.rest);
    if message.is_none() && !args.interactive {
        return Err(CliError::NoInput);
    }

    let rag_config = RagConfig::from_env();
    let service = RagService::new();
    service.init(&rag_config)?;
    info!(model = %rag_config.model, interactive = args.interactive, "market-rag ready");

    let mut conversation = Conversation::new();
    if let Some(question) = message {
        let answer = conversation.ask(&service, &question).await?;
        println!("{}", answer);
    }
    if args.interactive {
        run_repl_loop(&service, &mut conversation).await?;
    }
    Ok(())
}
