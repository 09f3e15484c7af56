//! Library half of the `market-rag` binary: argument resolution and conversation bookkeeping.
//!
//! The binary wires these to stdin/stdout; keeping them here lets them be tested against
//! `MockLlm` without a terminal.

use chrono::Utc;
use market_rag::agent::HistoryEntry;
use market_rag::{RagService, RunError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("config: {0}")]
    Config(#[from] config::LoadError),
    #[error("init: {0}")]
    Init(#[from] market_rag::InitError),
    #[error("run: {0}")]
    Run(#[from] RunError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("no question given; pass -m TEXT, a positional question, or -i")]
    NoInput,
}

/// `-m/--message` wins; otherwise positional words are joined with spaces.
pub fn resolve_message(message: Option<String>, rest: &[String]) -> Option<String> {
    message
        .or_else(|| (!rest.is_empty()).then(|| rest.join(" ")))
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

pub fn is_quit_command(s: &str) -> bool {
    let lower = s.trim().to_lowercase();
    matches!(lower.as_str(), "quit" | "exit" | "/quit")
}

/// In-memory transcript for the REPL. Each answered turn adds a user and an assistant entry.
#[derive(Debug, Default)]
pub struct Conversation {
    entries: Vec<HistoryEntry>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Runs one turn with the transcript so far. A failed turn is not recorded.
    pub async fn ask(&mut self, service: &RagService, input: &str) -> Result<String, RunError> {
        let asked_at = Utc::now();
        let answer = service.run(&self.entries, input).await?;
        self.entries.push(HistoryEntry {
            role: "user".to_string(),
            content: input.to_string(),
            timestamp: asked_at,
        });
        self.entries.push(HistoryEntry::assistant(answer.clone()));
        Ok(answer)
    }
}
